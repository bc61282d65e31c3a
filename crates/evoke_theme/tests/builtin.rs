use evoke_theme::css::{self, theme_variables};
use evoke_theme::{
    validate_theme, ColorRole, ColorScheme, EvokeTheme, MemoryRoot, StyleRoot, ThemeConfig,
    ThemeRegistry,
};
use pretty_assertions::assert_eq;

const SAMPLE_CONFIG: &str = include_str!("../../../demos/evoke.toml");

fn names(vars: &[(String, String)]) -> Vec<&str> {
    vars.iter().map(|(name, _)| name.as_str()).collect()
}

#[test]
fn built_in_themes_are_valid() {
    for theme in ThemeRegistry::default().iter() {
        assert_eq!(validate_theme(theme), vec![], "theme {} should validate", theme.name);
    }
}

#[test]
fn built_in_themes_cover_every_color_role() {
    for theme in [EvokeTheme::light(), EvokeTheme::dark()] {
        for role in ColorRole::ALL {
            assert!(
                theme.role(role).is_some(),
                "theme {} is missing {:?}",
                theme.name,
                role
            );
        }
    }
}

#[test]
fn light_and_dark_emit_the_same_variables() {
    // Switching overwrites every property, so nothing from the previous
    // theme can linger on the root.
    let light = theme_variables(&EvokeTheme::light(), "ui", true);
    let dark = theme_variables(&EvokeTheme::dark(), "ui", true);
    assert_eq!(names(&light), names(&dark));
}

#[test]
fn schemes_match_theme_names() {
    assert_eq!(EvokeTheme::light().scheme(), ColorScheme::Light);
    assert_eq!(EvokeTheme::dark().scheme(), ColorScheme::Dark);
}

#[test]
fn static_css_scopes_built_in_pair() {
    let light = css::to_static_css(&EvokeTheme::light(), "ui");
    let dark = css::to_static_css(&EvokeTheme::dark(), "ui");

    assert!(light.starts_with(":root {\n"));
    assert!(dark.starts_with(":root.dark {\n"));
    assert!(light.contains("  --ui-color-background: oklch(1 0 0);\n"));
    assert!(dark.contains("  --ui-color-background: oklch(0.145 0 0);\n"));
    assert!(light.ends_with("}\n"));
}

#[test]
fn inject_then_remove_leaves_root_clean() {
    let root = MemoryRoot::new();
    root.set_property("--other-color", "red").unwrap();

    let written = css::inject(&EvokeTheme::dark(), "ui", &root, true).unwrap();
    assert_eq!(written, root.property_names().len() - 1);
    assert!(root.has_class("dark"));

    let removed = css::remove("ui", &root).unwrap();
    assert_eq!(removed, written);
    assert_eq!(root.property_names(), vec!["--other-color"]);
    assert!(root.classes().is_empty());
    assert_eq!(root.attribute("data-theme"), None);
}

#[test]
fn sample_config_loads_cleanly() {
    let config = ThemeConfig::from_toml_str(SAMPLE_CONFIG).unwrap();

    assert_eq!(config.default_theme, "paper");
    assert_eq!(config.themes.names().collect::<Vec<_>>(), vec!["paper", "ink"]);
    assert!(config.diagnostics().is_empty(), "{:?}", config.diagnostics());

    let ink = config.themes.require("ink").unwrap();
    assert!(ink.scheme().is_dark());

    let vars = theme_variables(ink, &config.css_var_prefix, true);
    let lookup = |name: &str| {
        vars.iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    };
    assert_eq!(lookup("--app-color-background"), Some("oklch(0.18 0.02 260)"));
    assert_eq!(lookup("--app-color-primary-foreground"), Some("oklch(0.145 0 0)"));
    assert_eq!(lookup("--app-font-family-sans"), Some("Inter, system-ui, sans-serif"));
    assert_eq!(lookup("--app-button-height-lg"), Some("3rem"));
}
