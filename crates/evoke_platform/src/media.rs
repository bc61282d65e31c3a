//! Media query abstraction
//!
//! `MediaQueries` hides how a host evaluates and watches queries such as
//! `(prefers-color-scheme: dark)`. Watching returns a [`MediaWatch`] guard
//! that detaches the listener when dropped, so callers can't leak listeners.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

/// Callback receiving the new `matches` value of a watched query
pub type MediaListener = Rc<dyn Fn(bool)>;

/// Host media query evaluation
pub trait MediaQueries {
    /// Current match state; `None` if the host can't evaluate the query
    fn matches(&self, query: &str) -> Option<bool>;

    /// Watch a query for changes; `None` if watching is unsupported
    fn watch(&self, query: &str, listener: MediaListener) -> Option<MediaWatch>;
}

/// Guard for a registered media listener; dropping it detaches the listener
pub struct MediaWatch {
    detach: Option<Box<dyn FnOnce()>>,
}

impl MediaWatch {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detach now instead of at drop
    pub fn detach(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for MediaWatch {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for MediaWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaWatch")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

#[derive(Default)]
struct MediaState {
    values: FxHashMap<String, bool>,
    watchers: FxHashMap<u64, (String, MediaListener)>,
    next_id: u64,
}

/// Scriptable media queries for headless hosts and tests
///
/// Unknown queries evaluate to `false`. Cloning shares the same state.
#[derive(Clone, Default)]
pub struct MemoryMediaQueries {
    state: Rc<RefCell<MediaState>>,
}

impl MemoryMediaQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a query's match state, notifying watchers if it changed
    pub fn set(&self, query: &str, matches: bool) {
        let listeners: Vec<MediaListener> = {
            let mut state = self.state.borrow_mut();
            let previous = state.values.insert(query.to_string(), matches);
            if previous == Some(matches) || (previous.is_none() && !matches) {
                return;
            }
            state
                .watchers
                .values()
                .filter(|(q, _)| q == query)
                .map(|(_, listener)| listener.clone())
                .collect()
        };

        tracing::trace!("media query {} -> {}", query, matches);
        for listener in listeners {
            listener(matches);
        }
    }

    /// Number of attached listeners across all queries
    pub fn watcher_count(&self) -> usize {
        self.state.borrow().watchers.len()
    }
}

impl fmt::Debug for MemoryMediaQueries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryMediaQueries")
            .field("values", &state.values)
            .field("watchers", &state.watchers.len())
            .finish()
    }
}

impl MediaQueries for MemoryMediaQueries {
    fn matches(&self, query: &str) -> Option<bool> {
        Some(
            self.state
                .borrow()
                .values
                .get(query)
                .copied()
                .unwrap_or(false),
        )
    }

    fn watch(&self, query: &str, listener: MediaListener) -> Option<MediaWatch> {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.watchers.insert(id, (query.to_string(), listener));
            id
        };

        let weak: Weak<RefCell<MediaState>> = Rc::downgrade(&self.state);
        Some(MediaWatch::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().watchers.remove(&id);
            }
        }))
    }
}
