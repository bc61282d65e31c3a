//! Host capability bundle
//!
//! Every capability is optional. A bundle without a style root is treated as
//! a non-interactive (server) context.

use std::fmt;
use std::rc::Rc;

use crate::css::{supports_oklch, CssSupport};
use crate::media::MediaQueries;
use crate::root::StyleRoot;
use crate::storage::KeyValueStore;
use crate::timer::{Clock, Scheduler, SystemClock};

/// The host capabilities a theme runtime may use
#[derive(Clone)]
pub struct Environment {
    pub root: Option<Rc<dyn StyleRoot>>,
    pub store: Option<Rc<dyn KeyValueStore>>,
    pub media: Option<Rc<dyn MediaQueries>>,
    pub css: Option<Rc<dyn CssSupport>>,
    pub scheduler: Option<Rc<dyn Scheduler>>,
    pub clock: Rc<dyn Clock>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::server()
    }
}

impl Environment {
    /// No capabilities at all: server rendering, tests, CLI
    pub fn server() -> Self {
        Self {
            root: None,
            store: None,
            media: None,
            css: None,
            scheduler: None,
            clock: Rc::new(SystemClock),
        }
    }

    pub fn root(mut self, root: Rc<dyn StyleRoot>) -> Self {
        self.root = Some(root);
        self
    }

    pub fn store(mut self, store: Rc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn media(mut self, media: Rc<dyn MediaQueries>) -> Self {
        self.media = Some(media);
        self
    }

    pub fn css(mut self, css: Rc<dyn CssSupport>) -> Self {
        self.css = Some(css);
        self
    }

    pub fn scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Whether a style root is available to write to
    pub fn is_interactive(&self) -> bool {
        self.root.is_some()
    }

    /// Whether the host renders `oklch()` natively
    pub fn supports_oklch(&self) -> bool {
        supports_oklch(self.css.as_deref())
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("root", &self.root.is_some())
            .field("store", &self.store.is_some())
            .field("media", &self.media.is_some())
            .field("css", &self.css.is_some())
            .field("scheduler", &self.scheduler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::StaticCssSupport;
    use crate::root::MemoryRoot;

    #[test]
    fn test_server_environment_is_not_interactive() {
        let env = Environment::server();
        assert!(!env.is_interactive());
        assert!(!env.supports_oklch());
    }

    #[test]
    fn test_builder_enables_capabilities() {
        let env = Environment::server()
            .root(Rc::new(MemoryRoot::new()))
            .css(Rc::new(StaticCssSupport::new(true)));
        assert!(env.is_interactive());
        assert!(env.supports_oklch());
    }
}
