//! Read-only theme access for components

use std::fmt;
use std::rc::Rc;

use crate::css::var_name;
use crate::runtime::{RuntimeInner, ThemeSnapshot};
use crate::system::SystemPreferences;
use crate::theme::{ColorScheme, RuntimeThemeConfig};
use crate::tokens::{ColorRole, ColorToken};

/// Cloneable read-only projection of a [`ThemeRuntime`](crate::ThemeRuntime)
///
/// Every accessor reads the runtime's current state, so a view handed out
/// before a switch reflects the new theme afterwards.
#[derive(Clone)]
pub struct ThemeView {
    inner: Rc<RuntimeInner>,
}

impl fmt::Debug for ThemeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeView")
            .field("theme", &self.theme_name())
            .finish()
    }
}

impl ThemeView {
    pub(crate) fn new(inner: Rc<RuntimeInner>) -> Self {
        Self { inner }
    }

    /// The resolved theme record
    pub fn theme(&self) -> RuntimeThemeConfig {
        self.inner.state.borrow().resolved.clone()
    }

    /// Borrow the resolved theme without cloning it
    pub fn with_theme<R>(&self, f: impl FnOnce(&RuntimeThemeConfig) -> R) -> R {
        f(&self.inner.state.borrow().resolved)
    }

    pub fn theme_name(&self) -> String {
        self.inner.state.borrow().current_theme_name.clone()
    }

    pub fn label(&self) -> String {
        self.with_theme(|theme| theme.display_label().to_string())
    }

    pub fn scheme(&self) -> ColorScheme {
        self.with_theme(RuntimeThemeConfig::scheme)
    }

    pub fn is_dark(&self) -> bool {
        self.scheme().is_dark()
    }

    /// Registered theme names in toggle order
    pub fn theme_names(&self) -> Vec<String> {
        self.inner
            .config
            .themes
            .names()
            .map(str::to_string)
            .collect()
    }

    pub fn system_preference(&self) -> Option<ColorScheme> {
        self.inner.state.borrow().preferences.color_scheme
    }

    pub fn preferences(&self) -> SystemPreferences {
        self.inner.state.borrow().preferences
    }

    /// Color token by role key
    pub fn color(&self, role: &str) -> Option<ColorToken> {
        self.with_theme(|theme| theme.color_token(role).cloned())
    }

    pub fn role(&self, role: ColorRole) -> Option<ColorToken> {
        self.color(role.key())
    }

    pub fn prefix(&self) -> &str {
        &self.inner.config.css_var_prefix
    }

    /// `var(--{prefix}-{name})`
    pub fn css_var(&self, name: &str) -> String {
        format!("var({})", var_name(self.prefix(), &[name]))
    }

    /// `var(--{prefix}-color-{role})`
    pub fn color_var(&self, role: &str) -> String {
        format!("var({})", var_name(self.prefix(), &["color", role]))
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.inner.snapshot()
    }
}
