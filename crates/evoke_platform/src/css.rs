//! CSS capability probing

use crate::error::Result;

/// Property/value pair used to probe native OKLCH support
pub const OKLCH_PROBE: (&str, &str) = ("color", "oklch(0.5 0.1 250)");

/// Host CSS feature detection (`CSS.supports` in a browser)
pub trait CssSupport {
    fn supports(&self, property: &str, value: &str) -> Result<bool>;
}

/// Fixed answer for headless hosts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticCssSupport {
    pub oklch: bool,
}

impl StaticCssSupport {
    pub const fn new(oklch: bool) -> Self {
        Self { oklch }
    }
}

impl CssSupport for StaticCssSupport {
    fn supports(&self, _property: &str, value: &str) -> Result<bool> {
        if value.trim_start().starts_with("oklch(") {
            Ok(self.oklch)
        } else {
            Ok(true)
        }
    }
}

/// Whether the host renders `oklch()` natively
///
/// A missing probe or a probe that errors counts as unsupported.
pub fn supports_oklch(probe: Option<&dyn CssSupport>) -> bool {
    let Some(probe) = probe else {
        return false;
    };
    let (property, value) = OKLCH_PROBE;
    match probe.supports(property, value) {
        Ok(supported) => supported,
        Err(err) => {
            tracing::debug!("OKLCH support probe failed: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;

    struct Throwing;

    impl CssSupport for Throwing {
        fn supports(&self, _property: &str, _value: &str) -> Result<bool> {
            Err(PlatformError::Js("TypeError: CSS is undefined".to_string()))
        }
    }

    #[test]
    fn test_probe_results() {
        assert!(supports_oklch(Some(&StaticCssSupport::new(true))));
        assert!(!supports_oklch(Some(&StaticCssSupport::new(false))));
        assert!(!supports_oklch(Some(&Throwing)));
        assert!(!supports_oklch(None));
    }
}
