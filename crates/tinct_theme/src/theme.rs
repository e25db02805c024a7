//! Theme value types shared across the engine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tokens::{ColorToken, TokenMap};

/// Light or dark mode
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 2] = [ColorScheme::Light, ColorScheme::Dark];

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User-supplied light/dark color maps, full or partial
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedTheme {
    pub light: TokenMap,
    pub dark: TokenMap,
}

impl ImportedTheme {
    pub fn new(light: TokenMap, dark: TokenMap) -> Self {
        Self { light, dark }
    }

    pub fn for_scheme(&self, scheme: ColorScheme) -> &TokenMap {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// Whether both modes define every [`ColorToken::REQUIRED`] token
    pub fn has_required_tokens(&self) -> bool {
        ColorToken::REQUIRED
            .iter()
            .all(|t| self.light.contains(*t) && self.dark.contains(*t))
    }
}

/// Fully resolved token maps, one per mode, with no remaining references
/// to presets or overrides
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub light: TokenMap,
    pub dark: TokenMap,
}

impl ResolvedTheme {
    pub fn for_scheme(&self, scheme: ColorScheme) -> &TokenMap {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }
}
