//! System preference observation
//!
//! Reads and watches the host's color scheme, reduced motion and contrast
//! preferences. Media watchers are attached while at least one subscription
//! is alive and detached when the last one is dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use evoke_platform::{MediaQueries, MediaWatch};
use rustc_hash::FxHashMap;

use crate::theme::ColorScheme;

pub const COLOR_SCHEME_DARK_QUERY: &str = "(prefers-color-scheme: dark)";
pub const COLOR_SCHEME_LIGHT_QUERY: &str = "(prefers-color-scheme: light)";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const HIGH_CONTRAST_QUERY: &str = "(prefers-contrast: more)";

/// Queries watched for changes
///
/// The light query is only ever read: a scheme flip always changes the
/// dark query too.
const WATCHED_QUERIES: [&str; 3] = [
    COLOR_SCHEME_DARK_QUERY,
    REDUCED_MOTION_QUERY,
    HIGH_CONTRAST_QUERY,
];

/// The host's accessibility and appearance preferences
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemPreferences {
    /// `None` when the host expresses no preference
    pub color_scheme: Option<ColorScheme>,
    pub reduced_motion: bool,
    pub high_contrast: bool,
}

impl SystemPreferences {
    /// Read the current preferences once
    ///
    /// Without a media query capability everything is unset.
    pub fn snapshot(media: Option<&dyn MediaQueries>) -> Self {
        let Some(media) = media else {
            return Self::default();
        };
        let matches = |query: &str| media.matches(query).unwrap_or(false);

        let color_scheme = if matches(COLOR_SCHEME_DARK_QUERY) {
            Some(ColorScheme::Dark)
        } else if matches(COLOR_SCHEME_LIGHT_QUERY) {
            Some(ColorScheme::Light)
        } else {
            None
        };

        Self {
            color_scheme,
            reduced_motion: matches(REDUCED_MOTION_QUERY),
            high_contrast: matches(HIGH_CONTRAST_QUERY),
        }
    }
}

/// Callback for preference changes
pub type PreferenceListener = Rc<dyn Fn(SystemPreferences)>;

struct ObserverState {
    media: Option<Rc<dyn MediaQueries>>,
    current: SystemPreferences,
    listeners: FxHashMap<u64, PreferenceListener>,
    next_id: u64,
    watches: Vec<MediaWatch>,
}

/// Publishes system preference changes to subscribers
///
/// Cloning shares the same observer.
#[derive(Clone)]
pub struct SystemPreferenceObserver {
    state: Rc<RefCell<ObserverState>>,
}

impl fmt::Debug for SystemPreferenceObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SystemPreferenceObserver")
            .field("current", &state.current)
            .field("listeners", &state.listeners.len())
            .field("watching", &!state.watches.is_empty())
            .finish()
    }
}

impl SystemPreferenceObserver {
    pub fn new(media: Option<Rc<dyn MediaQueries>>) -> Self {
        let current = SystemPreferences::snapshot(media.as_deref());
        Self {
            state: Rc::new(RefCell::new(ObserverState {
                media,
                current,
                listeners: FxHashMap::default(),
                next_id: 0,
                watches: Vec::new(),
            })),
        }
    }

    /// Last observed preferences
    pub fn current(&self) -> SystemPreferences {
        self.state.borrow().current
    }

    /// Whether the host can report preferences at all
    pub fn is_supported(&self) -> bool {
        self.state.borrow().media.is_some()
    }

    /// Whether media watchers are currently attached
    pub fn is_watching(&self) -> bool {
        !self.state.borrow().watches.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Call `listener` whenever the preferences change
    ///
    /// The listener stays registered until the returned subscription is
    /// dropped.
    pub fn subscribe(
        &self,
        listener: impl Fn(SystemPreferences) + 'static,
    ) -> PreferenceSubscription {
        let (id, first) = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.insert(id, Rc::new(listener));
            (id, state.listeners.len() == 1)
        };

        if first {
            self.attach();
        }

        PreferenceSubscription {
            state: Rc::downgrade(&self.state),
            id,
        }
    }

    fn attach(&self) {
        let Some(media) = self.state.borrow().media.clone() else {
            return;
        };

        // Preferences may have moved while nobody was watching
        let current = SystemPreferences::snapshot(Some(media.as_ref()));
        self.state.borrow_mut().current = current;

        let mut watches = Vec::with_capacity(WATCHED_QUERIES.len());
        for query in WATCHED_QUERIES {
            let weak = Rc::downgrade(&self.state);
            let listener = Rc::new(move |_matches: bool| {
                if let Some(state) = weak.upgrade() {
                    refresh(&state);
                }
            });
            match media.watch(query, listener) {
                Some(watch) => watches.push(watch),
                None => tracing::debug!("media query `{}` can't be watched", query),
            }
        }

        tracing::debug!("watching {} system preference queries", watches.len());
        self.state.borrow_mut().watches = watches;
    }
}

/// Re-read preferences and notify listeners if anything changed
fn refresh(state: &Rc<RefCell<ObserverState>>) {
    let (preferences, listeners) = {
        let mut state = state.borrow_mut();
        let next = SystemPreferences::snapshot(state.media.as_deref());
        if next == state.current {
            return;
        }
        state.current = next;
        let listeners: Vec<PreferenceListener> = state.listeners.values().cloned().collect();
        (next, listeners)
    };

    tracing::debug!("system preferences changed: {:?}", preferences);
    for listener in listeners {
        listener(preferences);
    }
}

/// Keeps a preference listener registered; dropping it unsubscribes
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct PreferenceSubscription {
    state: Weak<RefCell<ObserverState>>,
    id: u64,
}

impl fmt::Debug for PreferenceSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for PreferenceSubscription {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let watches = {
            let mut state = state.borrow_mut();
            state.listeners.remove(&self.id);
            if state.listeners.is_empty() {
                std::mem::take(&mut state.watches)
            } else {
                Vec::new()
            }
        };
        if !watches.is_empty() {
            tracing::debug!("detaching system preference watchers");
        }
        // Detach outside the borrow; hosts may call back synchronously
        drop(watches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evoke_platform::MemoryMediaQueries;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn observer() -> (SystemPreferenceObserver, MemoryMediaQueries) {
        let media = MemoryMediaQueries::new();
        let observer = SystemPreferenceObserver::new(Some(Rc::new(media.clone())));
        (observer, media)
    }

    #[test]
    fn snapshot_reads_every_query() {
        let media = MemoryMediaQueries::new();
        assert_eq!(SystemPreferences::snapshot(Some(&media)), SystemPreferences::default());

        media.set(COLOR_SCHEME_LIGHT_QUERY, true);
        media.set(REDUCED_MOTION_QUERY, true);
        assert_eq!(
            SystemPreferences::snapshot(Some(&media)),
            SystemPreferences {
                color_scheme: Some(ColorScheme::Light),
                reduced_motion: true,
                high_contrast: false,
            }
        );

        media.set(COLOR_SCHEME_DARK_QUERY, true);
        media.set(HIGH_CONTRAST_QUERY, true);
        let prefs = SystemPreferences::snapshot(Some(&media));
        assert_eq!(prefs.color_scheme, Some(ColorScheme::Dark));
        assert!(prefs.high_contrast);
    }

    #[test]
    fn missing_capability_gives_static_defaults() {
        let observer = SystemPreferenceObserver::new(None);
        assert!(!observer.is_supported());
        let _sub = observer.subscribe(|_| {});
        assert!(!observer.is_watching());
        assert_eq!(observer.current(), SystemPreferences::default());
    }

    #[test]
    fn watchers_follow_subscription_lifetime() {
        let (observer, media) = observer();
        assert_eq!(media.watcher_count(), 0);

        let first = observer.subscribe(|_| {});
        let second = observer.subscribe(|_| {});
        assert_eq!(media.watcher_count(), 3);

        drop(first);
        assert_eq!(media.watcher_count(), 3);
        drop(second);
        assert_eq!(media.watcher_count(), 0);
        assert!(!observer.is_watching());
    }

    #[test]
    fn publishes_only_real_changes() {
        let (observer, media) = observer();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _sub = observer.subscribe(move |prefs| seen_clone.borrow_mut().push(prefs));

        media.set(COLOR_SCHEME_DARK_QUERY, true);
        media.set(COLOR_SCHEME_LIGHT_QUERY, false);
        media.set(REDUCED_MOTION_QUERY, true);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].color_scheme, Some(ColorScheme::Dark));
        assert!(seen[1].reduced_motion);
        assert_eq!(observer.current(), seen[1]);
    }

    #[test]
    fn changes_while_unobserved_are_picked_up_on_subscribe() {
        let (observer, media) = observer();
        let calls = Rc::new(Cell::new(0));

        media.set(COLOR_SCHEME_DARK_QUERY, true);
        assert_eq!(observer.current().color_scheme, None);

        let calls_clone = calls.clone();
        let _sub = observer.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));
        assert_eq!(observer.current().color_scheme, Some(ColorScheme::Dark));
        assert_eq!(calls.get(), 0);
    }
}
