//! Evoke Runtime Theming
//!
//! Themes are plain records of design tokens: OKLCH colors, typography,
//! spacing, motion and per-component values. At runtime they are flattened
//! into CSS custom properties on a style root, so components only ever
//! reference `var(--ui-...)`.
//!
//! # Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use evoke_theme::{Environment, MemoryRoot, StyleRoot, SwitchOptions, ThemeConfig, ThemeRuntime};
//!
//! let root = Rc::new(MemoryRoot::new());
//! let env = Environment::server().root(root.clone());
//! let runtime = ThemeRuntime::new(ThemeConfig::default(), env);
//!
//! runtime.switch_theme("dark", SwitchOptions::default());
//! assert!(root.has_class("dark"));
//! assert_eq!(root.attribute("data-theme").as_deref(), Some("dark"));
//! ```
//!
//! # Pieces
//!
//! - [`RuntimeThemeConfig`] and [`ThemeRegistry`]: theme records, loadable
//!   from TOML ([`ThemeConfig`]) or JSON
//! - [`css`]: variable naming, injection, removal and static CSS
//! - [`ThemeStorage`]: persisted preference with legacy migration
//! - [`SystemPreferenceObserver`]: color scheme, reduced motion, contrast
//! - [`ThemeRuntime`] and [`ThemeView`]: the live theme and its read-only
//!   projection
//!
//! Everything is single-threaded; host access goes through
//! [`evoke_platform`] capabilities.

pub mod config;
pub mod css;
pub mod error;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod theme;
pub mod themes;
pub mod tokens;
pub mod validate;
pub mod view;

pub use config::ThemeConfig;
pub use error::{InjectError, Result, ThemeError};
pub use runtime::{
    ChangeListener, RuntimePhase, SwitchOptions, ThemeRuntime, ThemeSnapshot, ThemeSubscription,
    TRANSITION_SUPPRESS_CLASS, TRANSITION_SUPPRESS_DURATION,
};
pub use storage::{StoredThemePreference, ThemeStorage, DEFAULT_CLEANUP_AGE, DEFAULT_STALE_AGE};
pub use system::{PreferenceSubscription, SystemPreferenceObserver, SystemPreferences};
pub use theme::{ColorScheme, RuntimeThemeConfig, ThemeRegistry};
pub use themes::EvokeTheme;
pub use tokens::*;
pub use validate::{validate_theme, ThemeIssue};
pub use view::ThemeView;

// Host capabilities, re-exported so most users only depend on this crate
pub use evoke_platform::{
    Environment, KeyValueStore, ManualClock, ManualScheduler, MediaQueries, MemoryMediaQueries,
    MemoryRoot, MemoryStore, StaticCssSupport, StyleRoot,
};
