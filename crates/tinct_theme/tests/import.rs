use std::sync::Arc;

use pretty_assertions::assert_eq;
use tinct_theme::{
    ColorScheme, ColorToken, CustomThemeArtifact, EngineConfig, ImportError, MemoryStorage,
    PresetRegistry, RecordingSurface, StyleToken, ThemeBase, ThemeController, ThemeSelection,
    ValidationError,
};

const CSS: &str = ":root{--background:#ffffff;--foreground:#0a0a0a;--primary:#171717;--primary-foreground:#ffffff;}\n.dark{--background:#0a0a0a;--foreground:#fafafa;--primary:#e5e5e5;--primary-foreground:#0a0a0a;}";

fn controller() -> ThemeController<MemoryStorage, RecordingSurface> {
    ThemeController::new(
        Arc::new(PresetRegistry::builtin()),
        MemoryStorage::new(),
        RecordingSurface::new(),
        &EngineConfig::default(),
    )
}

#[test]
fn css_import_resolves_both_modes() {
    let mut theme = controller();
    theme.import_css(CSS, "Test").unwrap();

    assert_eq!(theme.state().name, "Test");
    assert_eq!(theme.selection(), &ThemeSelection::Custom);
    assert_eq!(theme.resolved().get(ColorToken::Background), Some("#ffffff"));
    assert_eq!(theme.surface().property("--background"), Some("#ffffff"));

    theme.set_scheme(ColorScheme::Dark);
    assert_eq!(theme.resolved().get(ColorToken::Background), Some("#0a0a0a"));
    assert_eq!(theme.surface().property("--background"), Some("#0a0a0a"));
    assert_eq!(theme.surface().scheme(), Some(ColorScheme::Dark));
}

#[test]
fn css_import_requires_a_name() {
    let mut theme = controller();
    assert!(matches!(
        theme.import_css(CSS, "  "),
        Err(ImportError::MissingName)
    ));
}

#[test]
fn failed_import_leaves_theme_untouched() {
    let mut theme = controller();
    theme.set_style(StyleToken::Radius, "0.75rem").unwrap();
    let before = theme.state().clone();
    let writes = theme.surface().writes();

    let broken = CSS.replace("--primary:#171717;", "--primary:banana;");
    let err = theme.import_css(&broken, "Broken").unwrap_err();
    assert_eq!(
        err.to_string(),
        "The light theme has an invalid \"primary\" color: banana"
    );

    assert!(theme.import_json("{\"version\": 1}").is_err());
    assert!(theme.import_css(".dark { --x: 1", "Broken").is_err());

    assert_eq!(theme.state(), &before);
    assert_eq!(theme.surface().writes(), writes);
}

#[test]
fn version_is_checked_first() {
    let err = CustomThemeArtifact::from_json(
        r#"{"version": 2, "name": "", "base": {"type": "bogus"}, "overrides": 5}"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ImportError::Invalid(ValidationError::UnsupportedVersion)
    ));
    assert_eq!(err.to_string(), "Unsupported theme version. Expected version 1");
}

#[test]
fn base_type_is_checked_after_name() {
    let err = CustomThemeArtifact::from_json(
        r#"{"version": 1, "name": "X", "base": {"type": "bogus"}, "overrides": {}}"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ImportError::Invalid(ValidationError::UnknownBaseType(ref t)) if t == "bogus"
    ));
}

#[test]
fn json_export_round_trips_through_import() {
    let mut source = controller();
    source.select_preset("stone");
    source
        .set_color(ColorScheme::Dark, ColorToken::Accent, "hsl(200 80% 40%)")
        .unwrap();
    source.set_style(StyleToken::HueShift, "30").unwrap();
    let json = source.export_json().unwrap();

    let mut target = controller();
    target.import_json(&json).unwrap();

    assert_eq!(target.state().base, ThemeBase::preset("stone"));
    assert_eq!(target.export_artifact(), source.export_artifact());
    assert_eq!(target.resolved_theme(), source.resolved_theme());
}

#[test]
fn artifacts_may_carry_unknown_tokens() {
    let json = r##"{
        "version": 1,
        "name": "Extras",
        "base": {"type": "preset", "value": "zinc"},
        "overrides": {"other": {"letter-spacing": "0.02em"}, "light": {"brand": "#ff00ff"}}
    }"##;

    let mut theme = controller();
    theme.import_json(json).unwrap();
    assert_eq!(theme.surface().property("--letter-spacing"), Some("0.02em"));
    assert_eq!(theme.surface().property("--brand"), Some("#ff00ff"));
}

#[test]
fn css_export_reimports_to_the_same_colors() {
    let mut source = controller();
    source.select_preset("slate");
    let css = source.export_css();

    let mut target = controller();
    target.import_css(&css, "Copy").unwrap();

    for scheme in ColorScheme::ALL {
        source.set_scheme(scheme);
        target.set_scheme(scheme);
        for token in ColorToken::ALL {
            assert_eq!(target.resolved().get(*token), source.resolved().get(*token));
        }
    }
}
