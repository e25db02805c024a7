use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tinct_theme::{
    ColorScheme, ColorToken, EngineConfig, FileStorage, FontLoader, FontService, MemoryStorage,
    PresetRegistry, RecordingSurface, StyleToken, ThemeBase, ThemeController, ThemeSelection,
    ThemeStorage,
};

fn controller<S: ThemeStorage>(storage: S) -> ThemeController<S, RecordingSurface> {
    ThemeController::new(
        Arc::new(PresetRegistry::builtin()),
        storage,
        RecordingSurface::new(),
        &EngineConfig::default(),
    )
}

#[test]
fn restore_with_empty_storage_applies_default_preset() {
    let mut theme = controller(MemoryStorage::new());
    theme.restore();

    assert_eq!(theme.selection(), &ThemeSelection::Preset("neutral".into()));
    assert_eq!(theme.surface().property("--background"), Some("#ffffff"));
    assert_eq!(theme.surface().property("--radius"), Some("0.625rem"));
    assert_eq!(theme.surface().scheme(), Some(ColorScheme::Light));
}

#[test]
fn preset_selection_and_radius_survive_restore() {
    let storage = Arc::new(MemoryStorage::new());

    let mut first = controller(Arc::clone(&storage));
    first.select_preset("zinc");
    first.set_style(StyleToken::Radius, "0.3rem").unwrap();
    first.select_preset("slate");

    let mut second = controller(Arc::clone(&storage));
    second.restore();
    assert_eq!(second.state().base, ThemeBase::preset("slate"));
    assert_eq!(second.selection(), &ThemeSelection::Preset("slate".into()));
    assert_eq!(second.surface().property("--radius"), Some("0.3rem"));
}

#[test]
fn custom_theme_survives_restore() {
    let storage = Arc::new(MemoryStorage::new());

    let mut first = controller(Arc::clone(&storage));
    first.select_preset("stone");
    first
        .set_color(ColorScheme::Dark, ColorToken::Primary, "#f97316")
        .unwrap();

    let mut second = controller(Arc::clone(&storage));
    second.restore();
    assert_eq!(second.selection(), &ThemeSelection::Custom);
    assert_eq!(second.state(), first.state());

    second.set_scheme(ColorScheme::Dark);
    assert_eq!(second.surface().property("--primary"), Some("#f97316"));
}

#[test]
fn unknown_stored_preset_falls_back() {
    let storage = MemoryStorage::new();
    storage.set("tinct.theme", "retired-preset").unwrap();
    storage.set("tinct.radius", "not a length").unwrap();

    let mut theme = controller(storage);
    theme.restore();
    assert_eq!(theme.state().base, ThemeBase::preset("neutral"));
    assert_eq!(theme.surface().property("--radius"), Some("0.625rem"));
}

#[test]
fn unavailable_storage_still_themes() {
    let mut theme = controller(MemoryStorage::unavailable());
    theme.restore();
    theme.select_preset("zinc");
    theme
        .set_color(ColorScheme::Light, ColorToken::Primary, "#7c3aed")
        .unwrap();
    theme.set_style(StyleToken::Radius, "1rem").unwrap();

    assert_eq!(theme.surface().property("--primary"), Some("#7c3aed"));
    assert_eq!(theme.surface().property("--radius"), Some("1rem"));
    assert_eq!(theme.persistence().load_custom_theme(), None);
}

#[test]
fn file_storage_persists_between_sessions() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = controller(FileStorage::new(dir.path()));
    first.set_style(StyleToken::Spacing, "0.3rem").unwrap();

    let mut second = controller(FileStorage::new(dir.path()));
    second.restore();
    assert_eq!(second.surface().property("--spacing"), Some("0.3rem"));
    assert!(dir.path().join("tinct.custom-theme").exists());
}

#[test]
fn toggle_scheme_switches_values() {
    let mut theme = controller(MemoryStorage::new());
    theme.restore();

    assert_eq!(theme.toggle_scheme(), ColorScheme::Dark);
    assert_eq!(theme.surface().property("--background"), Some("#0a0a0a"));
    assert_eq!(theme.toggle_scheme(), ColorScheme::Light);
    assert_eq!(theme.surface().property("--background"), Some("#ffffff"));
}

#[test]
fn remove_and_reset_overrides() {
    let mut theme = controller(MemoryStorage::new());
    theme.select_preset("slate");
    theme
        .set_color(ColorScheme::Light, ColorToken::Accent, "#22c55e")
        .unwrap();
    theme.set_style(StyleToken::Radius, "2rem").unwrap();

    assert!(theme.remove_override(ColorToken::Accent));
    assert!(!theme.remove_override(ColorToken::Accent));
    assert_eq!(theme.surface().property("--accent"), Some("#f1f5f9"));

    theme.reset();
    assert!(theme.state().overrides.is_empty());
    assert_eq!(theme.selection(), &ThemeSelection::Preset("slate".into()));
    assert_eq!(theme.persistence().load_radius(), None);
    assert_eq!(theme.surface().property("--radius"), Some("0.5rem"));
}

#[test]
fn empty_optional_value_clears_override() {
    let mut theme = controller(MemoryStorage::new());
    theme.set_style(StyleToken::HueShift, "90").unwrap();
    theme.set_style(StyleToken::HueShift, "").unwrap();

    assert!(!theme.state().overrides.other.contains(StyleToken::HueShift));
    assert_eq!(theme.surface().property("--hue-shift"), Some("0"));
}

#[test]
fn independent_controllers_do_not_share_state() {
    let mut a = controller(MemoryStorage::new());
    let mut b = controller(MemoryStorage::new());
    a.select_preset("zinc");
    b.select_preset("stone");

    assert_eq!(a.state().base, ThemeBase::preset("zinc"));
    assert_eq!(b.state().base, ThemeBase::preset("stone"));
}

struct CountingFonts {
    injected: Mutex<Vec<String>>,
    polls: AtomicUsize,
}

impl FontService for CountingFonts {
    fn inject_stylesheet(&self, family: &str) -> bool {
        self.injected.lock().unwrap().push(family.to_string());
        true
    }

    fn is_available(&self, _family: &str) -> bool {
        self.polls.fetch_add(1, Ordering::SeqCst);
        false
    }
}

#[tokio::test(start_paused = true)]
async fn font_edits_start_loads_and_apply_immediately() {
    let fonts = Arc::new(CountingFonts {
        injected: Mutex::new(Vec::new()),
        polls: AtomicUsize::new(0),
    });
    let config = EngineConfig::default();
    let mut theme = controller(MemoryStorage::new())
        .with_font_loader(FontLoader::new(fonts.clone(), &config.fonts));

    theme
        .set_style(StyleToken::FontSans, "\"Inter\", sans-serif")
        .unwrap();
    assert_eq!(
        theme.surface().property("--font-sans"),
        Some("\"Inter\", sans-serif")
    );
    assert!(theme.fonts().unwrap().is_loading(StyleToken::FontSans));

    // superseded before it ever ran
    theme.set_style(StyleToken::FontSans, "Geist, sans-serif").unwrap();
    tokio::time::sleep(std::time::Duration::from_secs(4)).await;

    assert_eq!(*fonts.injected.lock().unwrap(), vec!["Geist".to_string()]);
    assert!(!theme.fonts().unwrap().is_loading(StyleToken::FontSans));
}

#[test]
fn json_import_without_radius_survives_restore() {
    let storage = Arc::new(MemoryStorage::new());

    let mut first = controller(Arc::clone(&storage));
    first.set_style(StyleToken::Radius, "2rem").unwrap();
    first
        .import_json(
            r#"{"version": 1, "name": "Plain", "base": {"type": "preset", "value": "zinc"}, "overrides": {}}"#,
        )
        .unwrap();
    assert_eq!(first.resolved().get(StyleToken::Radius), Some("0.625rem"));
    assert_eq!(first.persistence().load_radius(), None);

    let mut second = controller(Arc::clone(&storage));
    second.restore();
    assert_eq!(second.state(), first.state());
    assert_eq!(second.surface().property("--radius"), Some("0.625rem"));
}

#[test]
fn dropped_tokens_leave_the_surface() {
    let mut theme = controller(MemoryStorage::new());
    theme
        .import_json(
            r#"{"version": 1, "name": "Extras", "base": {"type": "preset", "value": "zinc"}, "overrides": {"other": {"letter-spacing": "0.02em"}}}"#,
        )
        .unwrap();
    assert_eq!(theme.surface().property("--letter-spacing"), Some("0.02em"));

    theme.select_preset("slate");
    assert_eq!(theme.resolved().get("letter-spacing"), None);
    assert_eq!(theme.surface().property("--letter-spacing"), None);

    let resolved = theme.resolved();
    let expected: Vec<(String, String)> = resolved
        .iter()
        .map(|(name, value)| (format!("--{}", name), value.to_string()))
        .collect();
    let actual: Vec<(String, String)> = theme
        .surface()
        .properties()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    assert_eq!(actual.len(), expected.len());
    for entry in &expected {
        assert!(actual.contains(entry), "missing {:?}", entry);
    }
}
