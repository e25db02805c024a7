//! Custom theme artifacts
//!
//! The portable export/import format: a base (preset key or embedded theme)
//! plus per-token overrides.
//!
//! ```json
//! {
//!   "version": 1,
//!   "name": "Ocean",
//!   "base": { "type": "preset", "value": "slate" },
//!   "overrides": {
//!     "light": { "primary": "#0ea5e9" },
//!     "other": { "radius": "1rem", "hue-shift": "12" }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ImportError;
use crate::theme::{ColorScheme, ImportedTheme};
use crate::tokens::TokenMap;
use crate::validate::validate_custom_theme;

/// The only artifact version this engine reads and writes
pub const ARTIFACT_VERSION: u32 = 1;

/// What a theme is built on
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ThemeBase {
    /// A built-in preset, by key
    Preset { value: String },
    /// An embedded light/dark theme
    Imported { theme: ImportedTheme },
}

impl ThemeBase {
    pub fn preset(key: impl Into<String>) -> Self {
        Self::Preset { value: key.into() }
    }

    pub fn imported(theme: ImportedTheme) -> Self {
        Self::Imported { theme }
    }

    pub fn preset_key(&self) -> Option<&str> {
        match self {
            Self::Preset { value } => Some(value),
            Self::Imported { .. } => None,
        }
    }
}

/// Per-token overrides layered over the base
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    #[serde(default, skip_serializing_if = "TokenMap::is_empty")]
    pub light: TokenMap,
    #[serde(default, skip_serializing_if = "TokenMap::is_empty")]
    pub dark: TokenMap,
    /// Mode-independent tokens
    #[serde(default, skip_serializing_if = "TokenMap::is_empty")]
    pub other: TokenMap,
}

impl ThemeOverrides {
    pub fn for_scheme(&self, scheme: ColorScheme) -> &TokenMap {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    pub fn for_scheme_mut(&mut self, scheme: ColorScheme) -> &mut TokenMap {
        match scheme {
            ColorScheme::Light => &mut self.light,
            ColorScheme::Dark => &mut self.dark,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty() && self.other.is_empty()
    }

    pub fn clear(&mut self) {
        self.light.clear();
        self.dark.clear();
        self.other.clear();
    }
}

/// Version 1 custom theme artifact
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomThemeArtifact {
    pub version: u32,
    pub name: String,
    pub base: ThemeBase,
    #[serde(default)]
    pub overrides: ThemeOverrides,
}

impl CustomThemeArtifact {
    pub fn new(name: impl Into<String>, base: ThemeBase, overrides: ThemeOverrides) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            name: name.into(),
            base,
            overrides,
        }
    }

    /// Parse and structurally validate an artifact.
    ///
    /// Validation runs on the raw JSON first so the first violated invariant
    /// is reported with its own message.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let mut raw: serde_json::Value = serde_json::from_str(json)?;
        validate_custom_theme(&raw)?;
        normalize_imported_modes(&mut raw);
        Ok(serde_json::from_value(raw)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Extra tokens in an imported base are not checked, so they may hold any
/// JSON value. Numbers and booleans become their text; anything else is
/// dropped.
fn normalize_imported_modes(raw: &mut Value) {
    let Some(theme) = raw.pointer_mut("/base/theme") else {
        return;
    };
    for mode in ["light", "dark"] {
        let Some(entries) = theme.get_mut(mode).and_then(Value::as_object_mut) else {
            continue;
        };
        entries.retain(|token, value| match value {
            Value::String(_) => true,
            Value::Number(n) => {
                *value = Value::String(n.to_string());
                true
            }
            Value::Bool(b) => {
                *value = Value::String(b.to_string());
                true
            }
            _ => {
                tracing::warn!("dropping non-scalar {} token {:?} from imported base", mode, token);
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::tokens::{ColorToken, StyleToken};
    use pretty_assertions::assert_eq;

    #[test]
    fn base_is_tagged_by_type() {
        let json = serde_json::to_string(&ThemeBase::preset("zinc")).unwrap();
        assert_eq!(json, r#"{"type":"preset","value":"zinc"}"#);
    }

    #[test]
    fn empty_override_groups_are_omitted() {
        let mut overrides = ThemeOverrides::default();
        overrides.other.insert(StyleToken::Radius, "1rem");
        let json = serde_json::to_string(&overrides).unwrap();
        assert_eq!(json, r#"{"other":{"radius":"1rem"}}"#);
    }

    #[test]
    fn json_round_trip() {
        let mut overrides = ThemeOverrides::default();
        overrides.light.insert(ColorToken::Primary, "#0ea5e9");
        overrides.other.insert("letter-spacing", "0.01em");
        let artifact = CustomThemeArtifact::new("Ocean", ThemeBase::preset("slate"), overrides);

        let json = artifact.to_json_pretty().unwrap();
        assert_eq!(CustomThemeArtifact::from_json(&json).unwrap(), artifact);
    }

    #[test]
    fn rejects_wrong_version_before_anything_else() {
        let err = CustomThemeArtifact::from_json(r#"{"version":2,"name":"X"}"#).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Invalid(ValidationError::UnsupportedVersion)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = CustomThemeArtifact::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ImportError::Json(_)));
    }

    #[test]
    fn imported_extras_may_be_any_json_value() {
        let mut light = serde_json::Map::new();
        let mut dark = serde_json::Map::new();
        for token in crate::tokens::ColorToken::REQUIRED {
            light.insert(token.name().to_string(), Value::from("#ffffff"));
            dark.insert(token.name().to_string(), Value::from("#000000"));
        }
        light.insert("line-height".into(), Value::from(1.5));
        light.insert("compact".into(), Value::from(true));
        dark.insert("layers".into(), serde_json::json!([1, 2]));
        dark.insert("unset".into(), Value::Null);

        let json = serde_json::json!({
            "version": 1,
            "name": "Extras",
            "base": { "type": "imported", "theme": { "light": light, "dark": dark } },
            "overrides": {}
        })
        .to_string();

        let artifact = CustomThemeArtifact::from_json(&json).unwrap();
        let ThemeBase::Imported { theme } = &artifact.base else {
            panic!("expected an imported base");
        };
        assert_eq!(theme.light.get("line-height"), Some("1.5"));
        assert_eq!(theme.light.get("compact"), Some("true"));
        assert_eq!(theme.dark.get("layers"), None);
        assert_eq!(theme.dark.get("unset"), None);
        assert_eq!(theme.dark.get(ColorToken::Background), Some("#000000"));
    }
}
