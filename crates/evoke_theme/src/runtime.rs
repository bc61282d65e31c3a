//! Theme runtime
//!
//! A [`ThemeRuntime`] owns the active theme for one style root. It picks
//! the initial theme from storage, the system color scheme or the
//! configured default, injects it, and keeps the root in sync as the user
//! switches themes or the system scheme changes.
//!
//! ```
//! use evoke_theme::{Environment, SwitchOptions, ThemeConfig, ThemeRuntime};
//!
//! let runtime = ThemeRuntime::new(ThemeConfig::default(), Environment::server());
//! assert_eq!(runtime.theme_name(), "light");
//!
//! runtime.switch_theme("dark", SwitchOptions::default());
//! assert!(runtime.view().is_dark());
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use evoke_platform::{Environment, StyleRoot, TimerId};
use rustc_hash::FxHashMap;

use crate::config::ThemeConfig;
use crate::css;
use crate::storage::{ThemeStorage, DEFAULT_CLEANUP_AGE};
use crate::system::{PreferenceSubscription, SystemPreferenceObserver, SystemPreferences};
use crate::theme::{ColorScheme, RuntimeThemeConfig};
use crate::themes::EvokeTheme;
use crate::validate::validate_theme;
use crate::view::ThemeView;

/// Root class that disables CSS transitions while a theme is swapped
pub const TRANSITION_SUPPRESS_CLASS: &str = "theme-transition-disabled";

/// How long the transition suppression class stays on the root
pub const TRANSITION_SUPPRESS_DURATION: Duration = Duration::from_millis(200);

/// Runtime lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimePhase {
    Uninitialized,
    Resolved,
}

/// Options for [`ThemeRuntime::switch_theme`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchOptions {
    /// Persist the choice so it survives reloads
    pub persist: bool,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self { persist: true }
    }
}

impl SwitchOptions {
    /// Switch for this session only
    pub fn transient() -> Self {
        Self { persist: false }
    }
}

/// What change listeners receive
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub phase: RuntimePhase,
    pub theme_name: String,
    pub is_dark: bool,
    pub system_preference: Option<ColorScheme>,
    pub preferences: SystemPreferences,
}

/// Callback for theme changes
pub type ChangeListener = Rc<dyn Fn(&ThemeSnapshot)>;

pub(crate) struct RuntimeState {
    pub(crate) phase: RuntimePhase,
    pub(crate) current_theme_name: String,
    pub(crate) resolved: RuntimeThemeConfig,
    pub(crate) preferences: SystemPreferences,
    /// An explicit switch happened this session
    pinned: bool,
    transition_timer: Option<TimerId>,
}

pub(crate) struct RuntimeInner {
    pub(crate) config: ThemeConfig,
    pub(crate) state: RefCell<RuntimeState>,
    env: Environment,
    storage: ThemeStorage,
    observer: SystemPreferenceObserver,
    oklch_supported: bool,
    listeners: RefCell<FxHashMap<u64, ChangeListener>>,
    next_listener: Cell<u64>,
    preference_subscription: RefCell<Option<PreferenceSubscription>>,
}

/// Owns the active theme for one style root
///
/// Dropping the runtime detaches system preference watchers, cancels the
/// pending transition timer and drops change listeners. Injected custom
/// properties stay on the root.
pub struct ThemeRuntime {
    inner: Rc<RuntimeInner>,
}

impl fmt::Debug for ThemeRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("ThemeRuntime")
            .field("phase", &state.phase)
            .field("theme", &state.current_theme_name)
            .field("pinned", &state.pinned)
            .field("env", &self.inner.env)
            .finish()
    }
}

impl ThemeRuntime {
    /// Create a runtime and resolve the initial theme
    pub fn new(config: ThemeConfig, env: Environment) -> Self {
        let interactive = env.is_interactive();
        let storage = ThemeStorage::from_env(&env);
        let observer = SystemPreferenceObserver::new(if interactive {
            env.media.clone()
        } else {
            None
        });
        let oklch_supported = interactive && env.supports_oklch();

        let fallback = config
            .themes
            .get(&config.default_theme)
            .cloned()
            .unwrap_or_else(EvokeTheme::light);

        let inner = RuntimeInner {
            state: RefCell::new(RuntimeState {
                phase: RuntimePhase::Uninitialized,
                current_theme_name: fallback.name.clone(),
                resolved: fallback,
                preferences: SystemPreferences::default(),
                pinned: false,
                transition_timer: None,
            }),
            config,
            env,
            storage,
            observer,
            oklch_supported,
            listeners: RefCell::new(FxHashMap::default()),
            next_listener: Cell::new(0),
            preference_subscription: RefCell::new(None),
        };

        let runtime = Self {
            inner: Rc::new(inner),
        };
        runtime.initialize();
        runtime
    }

    fn initialize(&self) {
        let inner = &self.inner;
        let config = &inner.config;

        if !inner.env.is_interactive() {
            tracing::debug!(
                "no style root; resolving `{}` without storage or system preferences",
                config.default_theme
            );
            let theme = inner.resolve(&config.default_theme);
            let mut state = inner.state.borrow_mut();
            state.current_theme_name = theme.name.clone();
            state.resolved = theme;
            state.phase = RuntimePhase::Resolved;
            return;
        }

        let key = &config.storage_key;
        inner.storage.migrate_legacy(key);
        let removed = inner.storage.cleanup_stale(DEFAULT_CLEANUP_AGE, key);
        if removed > 0 {
            tracing::debug!("removed {} stale theme preference(s)", removed);
        }

        let preferences = inner.observer.current();
        inner.state.borrow_mut().preferences = preferences;

        let selected = match inner.storage.get(key) {
            Some(stored) if config.themes.contains(&stored.theme) => {
                tracing::debug!("using stored theme `{}`", stored.theme);
                stored.theme
            }
            stored => {
                if let Some(stored) = stored {
                    tracing::warn!(
                        "stored theme `{}` is not registered; ignoring it",
                        stored.theme
                    );
                }
                match inner.system_target(preferences) {
                    Some(name) => {
                        tracing::debug!("following system color scheme `{}`", name);
                        name.to_string()
                    }
                    None => config.default_theme.clone(),
                }
            }
        };

        if !inner.install(&selected) && selected != config.default_theme {
            inner.install(&config.default_theme);
        }
        inner.state.borrow_mut().phase = RuntimePhase::Resolved;

        let weak = Rc::downgrade(&self.inner);
        let subscription = inner.observer.subscribe(move |preferences| {
            if let Some(inner) = weak.upgrade() {
                inner.on_system_change(preferences);
            }
        });
        *inner.preference_subscription.borrow_mut() = Some(subscription);
    }

    /// Switch to a registered theme
    ///
    /// Unregistered names are rejected with a warning and change nothing.
    /// An explicit switch stops the runtime from following the system
    /// color scheme. Returns whether the theme was applied.
    ///
    /// Listeners run last, once the root and storage both reflect `name`,
    /// so a listener may switch again.
    pub fn switch_theme(&self, name: &str, options: SwitchOptions) -> bool {
        let inner = &self.inner;
        if !inner.config.themes.contains(name) {
            tracing::warn!("cannot switch to unregistered theme `{}`", name);
            return false;
        }
        if !inner.install(name) {
            return false;
        }

        inner.state.borrow_mut().pinned = true;
        if options.persist && inner.env.is_interactive() {
            let system = inner.state.borrow().preferences.color_scheme;
            inner.storage.set(name, &inner.config.storage_key, system);
        }
        inner.notify();
        true
    }

    /// Switch to the next registered theme, wrapping around
    pub fn toggle_theme(&self) -> bool {
        let current = self.inner.state.borrow().current_theme_name.clone();
        let Some(next) = self.inner.config.themes.next_after(&current).map(str::to_string) else {
            tracing::warn!("no themes registered; nothing to toggle");
            return false;
        };
        self.switch_theme(&next, SwitchOptions::default())
    }

    /// Forget the explicit preference and go back to the system scheme or
    /// the default theme
    pub fn clear_preference(&self) -> bool {
        let inner = &self.inner;
        if inner.env.is_interactive() {
            inner.storage.clear(&inner.config.storage_key);
        }
        inner.state.borrow_mut().pinned = false;

        let preferences = inner.state.borrow().preferences;
        let target = inner
            .system_target(preferences)
            .map(str::to_string)
            .unwrap_or_else(|| inner.config.default_theme.clone());
        if !inner.install(&target) {
            return false;
        }
        inner.notify();
        true
    }

    /// Call `listener` after every theme or system preference change
    ///
    /// The listener stays registered until the returned subscription is
    /// dropped.
    pub fn subscribe(&self, listener: impl Fn(&ThemeSnapshot) + 'static) -> ThemeSubscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(listener));
        ThemeSubscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Read-only projection for consumers
    pub fn view(&self) -> ThemeView {
        ThemeView::new(self.inner.clone())
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.inner.snapshot()
    }

    pub fn phase(&self) -> RuntimePhase {
        self.inner.state.borrow().phase
    }

    pub fn theme_name(&self) -> String {
        self.inner.state.borrow().current_theme_name.clone()
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.inner.config
    }

    /// Whether colors are emitted as `oklch()` rather than RGB
    pub fn oklch_supported(&self) -> bool {
        self.inner.oklch_supported
    }

    /// Whether the runtime has stopped following the system color scheme
    pub fn has_explicit_preference(&self) -> bool {
        self.inner.has_explicit_preference()
    }
}

impl Drop for ThemeRuntime {
    fn drop(&mut self) {
        let subscription = self.inner.preference_subscription.borrow_mut().take();
        drop(subscription);
        self.inner.end_transition();
        self.inner.listeners.borrow_mut().clear();
        tracing::debug!("theme runtime torn down");
    }
}

impl RuntimeInner {
    /// Registered theme for `name`, falling back to the default theme and
    /// then the built-in light theme
    fn resolve(&self, name: &str) -> RuntimeThemeConfig {
        if let Some(theme) = self.config.themes.get(name) {
            return theme.clone();
        }
        tracing::warn!(
            "theme `{}` is not registered; falling back to `{}`",
            name,
            self.config.default_theme
        );
        if let Some(theme) = self.config.themes.get(&self.config.default_theme) {
            return theme.clone();
        }
        tracing::warn!(
            "default theme `{}` is not registered; using the built-in light theme",
            self.config.default_theme
        );
        EvokeTheme::light()
    }

    /// Registered theme named after the system color scheme, if following it
    fn system_target(&self, preferences: SystemPreferences) -> Option<&'static str> {
        if !self.config.enable_system {
            return None;
        }
        let name = preferences.color_scheme?.as_str();
        self.config.themes.contains(name).then_some(name)
    }

    fn has_explicit_preference(&self) -> bool {
        if self.state.borrow().pinned {
            return true;
        }
        if !self.env.is_interactive() {
            return false;
        }
        self.storage
            .get(&self.config.storage_key)
            .is_some_and(|stored| self.config.themes.contains(&stored.theme))
    }

    /// Resolve, validate and inject a theme
    ///
    /// On failure the last good theme stays active and `false` is returned.
    /// Callers publish the change with [`RuntimeInner::notify`] once their
    /// own bookkeeping is done.
    fn install(self: &Rc<Self>, requested: &str) -> bool {
        let theme = self.resolve(requested);

        let issues = validate_theme(&theme);
        if !issues.is_empty() {
            let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
            tracing::warn!(
                "theme `{}` is invalid and was not applied: {}",
                theme.name,
                issues.join("; ")
            );
            return false;
        }

        if let Some(root) = self.env.root.clone() {
            let suppressing = self.begin_transition(root.as_ref());
            let prefix = &self.config.css_var_prefix;

            let oklch = self.oklch_supported;

            if let Err(err) = css::inject(&theme, prefix, root.as_ref(), oklch) {
                tracing::warn!("failed to inject theme `{}`: {}", theme.name, err);
                let previous = self.state.borrow().resolved.clone();
                if let Err(err) = css::inject(&previous, prefix, root.as_ref(), oklch) {
                    tracing::warn!("failed to restore theme `{}`: {}", previous.name, err);
                }
                if suppressing {
                    self.end_transition();
                }
                return false;
            }

            if suppressing {
                self.schedule_transition_end();
            }
        }

        {
            let mut state = self.state.borrow_mut();
            tracing::debug!(
                "theme `{}` -> `{}`",
                state.current_theme_name,
                theme.name
            );
            state.current_theme_name = theme.name.clone();
            state.resolved = theme;
            state.phase = RuntimePhase::Resolved;
        }
        true
    }

    fn on_system_change(self: &Rc<Self>, preferences: SystemPreferences) {
        let scheme_changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.preferences.color_scheme != preferences.color_scheme;
            state.preferences = preferences;
            changed
        };

        if scheme_changed {
            if let Some(target) = self.system_target(preferences) {
                let current = self.state.borrow().current_theme_name.clone();
                if self.has_explicit_preference() {
                    tracing::debug!(
                        "system scheme is now `{}`; keeping explicit theme `{}`",
                        target,
                        current
                    );
                } else if current != target {
                    self.install(target);
                }
            }
        }
        self.notify();
    }

    fn begin_transition(&self, root: &dyn StyleRoot) -> bool {
        if self.config.disable_transitions || self.env.scheduler.is_none() {
            return false;
        }
        match root.add_class(TRANSITION_SUPPRESS_CLASS) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("can't suppress transitions: {}", err);
                false
            }
        }
    }

    fn schedule_transition_end(self: &Rc<Self>) {
        let Some(scheduler) = self.env.scheduler.clone() else {
            return;
        };

        let previous = self.state.borrow_mut().transition_timer.take();
        if let Some(previous) = previous {
            scheduler.clear_timeout(previous);
        }

        let weak: Weak<Self> = Rc::downgrade(self);
        let timer = scheduler.set_timeout(
            TRANSITION_SUPPRESS_DURATION,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.state.borrow_mut().transition_timer = None;
                    inner.remove_transition_class();
                }
            }),
        );

        match timer {
            Some(id) => self.state.borrow_mut().transition_timer = Some(id),
            None => self.remove_transition_class(),
        }
    }

    /// Cancel the pending timer and drop the suppression class now
    fn end_transition(&self) {
        let pending = self.state.borrow_mut().transition_timer.take();
        if let (Some(id), Some(scheduler)) = (pending, &self.env.scheduler) {
            scheduler.clear_timeout(id);
        }
        self.remove_transition_class();
    }

    fn remove_transition_class(&self) {
        if let Some(root) = &self.env.root {
            if let Err(err) = root.remove_class(TRANSITION_SUPPRESS_CLASS) {
                tracing::debug!("can't remove transition suppression: {}", err);
            }
        }
    }

    pub(crate) fn snapshot(&self) -> ThemeSnapshot {
        let state = self.state.borrow();
        ThemeSnapshot {
            phase: state.phase,
            theme_name: state.current_theme_name.clone(),
            is_dark: state.resolved.scheme().is_dark(),
            system_preference: state.preferences.color_scheme,
            preferences: state.preferences,
        }
    }

    fn notify(&self) {
        let listeners: Vec<ChangeListener> = self.listeners.borrow().values().cloned().collect();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Keeps a change listener registered; dropping it unsubscribes
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct ThemeSubscription {
    inner: Weak<RuntimeInner>,
    id: u64,
}

impl fmt::Debug for ThemeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.listeners.borrow_mut().remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeRegistry;

    #[test]
    fn server_runtime_resolves_default() {
        let runtime = ThemeRuntime::new(
            ThemeConfig::default().default_theme("dark"),
            Environment::server(),
        );
        assert_eq!(runtime.phase(), RuntimePhase::Resolved);
        assert_eq!(runtime.theme_name(), "dark");
        assert!(runtime.snapshot().is_dark);
        assert!(!runtime.oklch_supported());
    }

    #[test]
    fn missing_default_falls_back_to_built_in_light() {
        let config = ThemeConfig::default()
            .themes(ThemeRegistry::new())
            .default_theme("brand");
        let runtime = ThemeRuntime::new(config, Environment::server());
        assert_eq!(runtime.theme_name(), "light");
        assert!(!runtime.snapshot().is_dark);
    }

    #[test]
    fn switch_options_default_to_persisting() {
        assert!(SwitchOptions::default().persist);
        assert!(!SwitchOptions::transient().persist);
    }

    #[test]
    fn server_switch_updates_state_only() {
        let runtime = ThemeRuntime::new(ThemeConfig::default(), Environment::server());
        assert!(runtime.switch_theme("dark", SwitchOptions::default()));
        assert_eq!(runtime.theme_name(), "dark");
        assert!(runtime.has_explicit_preference());
        assert!(!runtime.switch_theme("sepia", SwitchOptions::default()));
        assert_eq!(runtime.theme_name(), "dark");
    }
}
