//! Session theme state
//!
//! A [`ThemeController`] owns the active [`ThemeState`] and is the only
//! writer to its [`StyleSurface`]. Controllers are created per session and
//! are independent of each other.
//!
//! Every successful edit re-resolves, persists the custom artifact and
//! pushes the result to the surface. A rejected edit or import leaves state,
//! storage and surface untouched.

use std::sync::Arc;

use indexmap::IndexSet;

use crate::artifact::{CustomThemeArtifact, ThemeBase, ThemeOverrides};
use crate::config::EngineConfig;
use crate::css::{export_css, parse_css_theme};
use crate::error::ImportError;
use crate::fonts::FontLoader;
use crate::persist::{ThemePersistence, ThemeSelection, ThemeStorage};
use crate::presets::PresetRegistry;
use crate::resolve::{resolve, resolve_theme};
use crate::surface::StyleSurface;
use crate::theme::{ColorScheme, ResolvedTheme};
use crate::tokens::*;
use crate::validate::{validate_color, validate_style, Validation};

/// The active theme: what it is built on and how it is edited
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeState {
    pub name: String,
    pub base: ThemeBase,
    pub overrides: ThemeOverrides,
    pub scheme: ColorScheme,
}

impl ThemeState {
    fn from_preset(registry: &PresetRegistry, key: &str, scheme: ColorScheme) -> Self {
        let preset = registry.resolve_or_default(key);
        Self {
            name: preset.label().to_string(),
            base: ThemeBase::preset(preset.key()),
            overrides: ThemeOverrides::default(),
            scheme,
        }
    }

    fn from_artifact(artifact: CustomThemeArtifact, scheme: ColorScheme) -> Self {
        Self {
            name: artifact.name,
            base: artifact.base,
            overrides: artifact.overrides,
            scheme,
        }
    }
}

/// Owns the session's theme and pushes it to a surface
pub struct ThemeController<S: ThemeStorage, D: StyleSurface> {
    state: ThemeState,
    selection: ThemeSelection,
    registry: Arc<PresetRegistry>,
    persistence: ThemePersistence<S>,
    surface: D,
    fonts: Option<FontLoader>,
    property_prefix: String,
    applied: IndexSet<String>,
}

impl<S: ThemeStorage, D: StyleSurface> ThemeController<S, D> {
    /// Start on the configured default preset. Nothing is read or applied
    /// until [`restore`](Self::restore) or an edit.
    pub fn new(
        registry: Arc<PresetRegistry>,
        storage: S,
        surface: D,
        config: &EngineConfig,
    ) -> Self {
        let default_key = if registry.contains(&config.default_preset) {
            config.default_preset.clone()
        } else {
            registry.default_key().to_string()
        };
        let state = ThemeState::from_preset(&registry, &default_key, ColorScheme::default());

        Self {
            selection: ThemeSelection::Preset(default_key),
            state,
            registry,
            persistence: ThemePersistence::new(storage, config.storage_namespace.clone()),
            surface,
            fonts: None,
            property_prefix: config.property_prefix.clone(),
            applied: IndexSet::new(),
        }
    }

    /// Load fonts for typography edits
    pub fn with_font_loader(mut self, loader: FontLoader) -> Self {
        self.fonts = Some(loader);
        self
    }

    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    pub fn selection(&self) -> &ThemeSelection {
        &self.selection
    }

    pub fn scheme(&self) -> ColorScheme {
        self.state.scheme
    }

    pub fn registry(&self) -> &PresetRegistry {
        &self.registry
    }

    pub fn persistence(&self) -> &ThemePersistence<S> {
        &self.persistence
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn fonts(&self) -> Option<&FontLoader> {
        self.fonts.as_ref()
    }

    fn default_key(&self) -> String {
        match &self.selection {
            ThemeSelection::Preset(key) if self.registry.contains(key) => key.clone(),
            _ => self.registry.default_key().to_string(),
        }
    }

    // ========== Session ==========

    /// Reload the persisted selection, radius and custom theme, then apply.
    ///
    /// Unknown preset keys and unreadable custom themes fall back to the
    /// default preset.
    pub fn restore(&mut self) {
        let scheme = self.state.scheme;
        let fallback = self.registry.default_key().to_string();

        let (state, selection) = match self.persistence.load_selection() {
            Some(ThemeSelection::Custom) => match self.persistence.load_custom_theme() {
                Some(artifact) => (
                    ThemeState::from_artifact(artifact, scheme),
                    ThemeSelection::Custom,
                ),
                None => {
                    tracing::warn!("custom theme selected but none stored; using {:?}", fallback);
                    (
                        ThemeState::from_preset(&self.registry, &fallback, scheme),
                        ThemeSelection::Preset(fallback),
                    )
                }
            },
            Some(ThemeSelection::Preset(key)) if self.registry.contains(&key) => (
                ThemeState::from_preset(&self.registry, &key, scheme),
                ThemeSelection::Preset(key),
            ),
            Some(ThemeSelection::Preset(key)) => {
                tracing::warn!("stored preset {:?} is unknown; using {:?}", key, fallback);
                (
                    ThemeState::from_preset(&self.registry, &fallback, scheme),
                    ThemeSelection::Preset(fallback),
                )
            }
            None => (
                ThemeState::from_preset(&self.registry, &self.default_key(), scheme),
                ThemeSelection::Preset(self.default_key()),
            ),
        };

        self.state = state;
        self.selection = selection;

        if !self.state.overrides.other.contains(StyleToken::Radius) {
            if let Some(radius) = self.persistence.load_radius() {
                match validate_style(StyleToken::Radius, &radius) {
                    Ok(()) => {
                        self.state.overrides.other.insert(StyleToken::Radius, radius);
                    }
                    Err(e) => tracing::warn!("ignoring stored radius {:?}: {}", radius, e),
                }
            }
        }

        tracing::debug!(
            "restored theme {:?} ({})",
            self.state.name,
            self.selection.as_str()
        );
        self.load_fonts();
        self.apply();
    }

    // ========== Presets ==========

    /// Switch to a preset, dropping any custom theme. The persisted radius
    /// is kept. Returns `false` and changes nothing if `key` is unknown.
    pub fn select_preset(&mut self, key: &str) -> bool {
        if !self.registry.contains(key) {
            tracing::warn!("cannot select unknown preset {:?}", key);
            return false;
        }

        let radius = self
            .persistence
            .load_radius()
            .or_else(|| self.state.overrides.other.get(StyleToken::Radius).map(str::to_string));

        self.state = ThemeState::from_preset(&self.registry, key, self.state.scheme);
        if let Some(radius) = radius {
            self.state.overrides.other.insert(StyleToken::Radius, radius);
        }
        self.selection = ThemeSelection::Preset(key.to_string());

        self.persistence.save_selection(&self.selection);
        self.persistence.clear_custom_theme();
        tracing::debug!("selected preset {:?}", key);
        self.apply();
        true
    }

    // ========== Color Scheme ==========

    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        if self.state.scheme != scheme {
            tracing::debug!("switching from {} to {}", self.state.scheme, scheme);
            self.state.scheme = scheme;
        }
        self.apply();
    }

    /// Flip between light and dark; returns the new scheme
    pub fn toggle_scheme(&mut self) -> ColorScheme {
        let scheme = self.state.scheme.toggle();
        self.set_scheme(scheme);
        scheme
    }

    // ========== Edits ==========

    /// Override a color for one mode
    pub fn set_color(&mut self, scheme: ColorScheme, token: ColorToken, value: &str) -> Validation {
        validate_color(value)?;
        self.state
            .overrides
            .for_scheme_mut(scheme)
            .insert(token, value.trim());
        tracing::trace!("{} {} = {}", scheme, token, value.trim());
        self.commit();
        Ok(())
    }

    /// Override a mode-independent token. An empty value, where allowed,
    /// removes the override.
    pub fn set_style(&mut self, token: StyleToken, value: &str) -> Validation {
        validate_style(token, value)?;
        let value = value.trim();

        if value.is_empty() {
            self.state.overrides.other.remove(token);
        } else {
            self.state.overrides.other.insert(token, value);
        }

        if token == StyleToken::Radius {
            self.persistence.save_radius(value);
        }
        if token.is_font() {
            self.load_font(token, value);
        }

        tracing::trace!("{} = {:?}", token, value);
        self.commit();
        Ok(())
    }

    /// Drop every override of `name`; returns whether any existed
    pub fn remove_override(&mut self, name: impl Into<TokenName>) -> bool {
        let name = name.into();
        let overrides = &mut self.state.overrides;
        let removed = [
            overrides.light.remove(&name),
            overrides.dark.remove(&name),
            overrides.other.remove(&name),
        ]
        .iter()
        .any(Option::is_some);

        if removed {
            if name == TokenName::Style(StyleToken::Radius) {
                self.persistence.clear_radius();
            }
            self.commit();
        }
        removed
    }

    /// Clear all overrides, keeping the base
    pub fn reset(&mut self) {
        self.state.overrides.clear();
        self.persistence.clear_radius();

        match &self.state.base {
            ThemeBase::Preset { value } => {
                let key = value.clone();
                self.persistence.clear_custom_theme();
                self.selection = ThemeSelection::Preset(key);
                self.persistence.save_selection(&self.selection);
                self.apply();
            }
            ThemeBase::Imported { .. } => self.commit(),
        }
    }

    // ========== Import / Export ==========

    /// Replace the theme with a JSON artifact
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        let artifact = CustomThemeArtifact::from_json(json)?;
        tracing::debug!("imported custom theme {:?}", artifact.name);

        match artifact.overrides.other.get(StyleToken::Radius) {
            Some(radius) => self.persistence.save_radius(radius),
            None => self.persistence.clear_radius(),
        }
        self.state = ThemeState::from_artifact(artifact, self.state.scheme);
        self.load_fonts();
        self.commit();
        Ok(())
    }

    /// Replace the theme with CSS `:root` / `.dark` blocks under `name`
    pub fn import_css(&mut self, css: &str, name: &str) -> Result<(), ImportError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ImportError::MissingName);
        }
        let theme = parse_css_theme(css)?;
        tracing::debug!("imported CSS theme {:?}", name);

        self.state.name = name.to_string();
        self.state.base = ThemeBase::imported(theme);
        self.state.overrides.clear();
        self.persistence.clear_radius();
        self.commit();
        Ok(())
    }

    pub fn export_artifact(&self) -> CustomThemeArtifact {
        CustomThemeArtifact::new(
            self.state.name.clone(),
            self.state.base.clone(),
            self.state.overrides.clone(),
        )
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.export_artifact().to_json_pretty()
    }

    pub fn export_css(&self) -> String {
        export_css(&self.resolved_theme())
    }

    // ========== Resolution ==========

    /// Resolved tokens for the active scheme
    pub fn resolved(&self) -> TokenMap {
        resolve(
            &self.state.base,
            &self.state.overrides,
            self.state.scheme,
            &self.registry,
        )
    }

    pub fn resolved_theme(&self) -> ResolvedTheme {
        resolve_theme(&self.state.base, &self.state.overrides, &self.registry)
    }

    /// Write every resolved token to the surface, then select the scheme.
    /// Properties written by an earlier apply that are no longer resolved
    /// are removed.
    pub fn apply(&mut self) {
        let tokens = self.resolved();
        let mut applied = IndexSet::with_capacity(tokens.len());
        for (name, value) in tokens.iter() {
            let property = format!("{}{}", self.property_prefix, name);
            self.surface.set_property(&property, value);
            applied.insert(property);
        }
        for stale in self.applied.iter().filter(|p| !applied.contains(*p)) {
            tracing::trace!("removing stale property {}", stale);
            self.surface.remove_property(stale);
        }
        self.applied = applied;
        self.surface.set_scheme(self.state.scheme);
        tracing::trace!("applied {} tokens ({})", tokens.len(), self.state.scheme);
    }

    /// Persist the edited theme as the active custom theme and apply it.
    fn commit(&mut self) {
        self.selection = ThemeSelection::Custom;
        self.persistence.save_selection(&self.selection);
        self.persistence.save_custom_theme(&self.export_artifact());
        self.apply();
    }

    fn load_font(&mut self, token: StyleToken, stack: &str) {
        if let Some(fonts) = self.fonts.as_mut() {
            // the wait is detached; a newer request for the token aborts it
            let _ = fonts.load(token, stack);
        }
    }

    fn load_fonts(&mut self) {
        let fonts: Vec<(StyleToken, String)> = self
            .state
            .overrides
            .other
            .iter()
            .filter_map(|(name, value)| {
                let token = name.style().filter(|t| t.is_font())?;
                Some((token, value.to_string()))
            })
            .collect();
        for (token, stack) in fonts {
            self.load_font(token, &stack);
        }
    }
}

impl<S, D> std::fmt::Debug for ThemeController<S, D>
where
    S: ThemeStorage + std::fmt::Debug,
    D: StyleSurface + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("persistence", &self.persistence)
            .field("surface", &self.surface)
            .field("fonts", &self.fonts)
            .finish()
    }
}
