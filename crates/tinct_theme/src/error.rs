use std::path::PathBuf;

use thiserror::Error;

use crate::theme::ColorScheme;

/// A rejected value. `Display` is the message shown next to the field or
/// import attempt that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Invalid color format. Use hex (#fff or #ffffff), rgb(), rgba(), hsl(), hsla(), oklch(), var(--name), transparent, or currentColor")]
    InvalidColor,

    #[error("Invalid {field} value. Use a number followed by px, rem, em, ch, ex, vh, vw, vmin, vmax or %, or 0")]
    InvalidLength { field: &'static str },

    #[error("{field} cannot be negative")]
    NegativeLength { field: &'static str },

    #[error("Shadow opacity must be a number between 0 and 1")]
    InvalidOpacity,

    #[error("{field} must be a valid number")]
    NotANumber { field: &'static str },

    #[error("{field} must be zero or greater")]
    NegativeMultiplier { field: &'static str },

    #[error("Theme must be a JSON object")]
    NotAnObject,

    #[error("Theme must include both light and dark modes")]
    MissingModes,

    #[error("The {mode} theme must be an object")]
    ModeNotObject { mode: ColorScheme },

    #[error("The {mode} theme is missing the required \"{token}\" color")]
    MissingRequiredColor {
        mode: ColorScheme,
        token: &'static str,
    },

    #[error("The {mode} theme has an invalid \"{token}\" color: {value}")]
    InvalidRequiredColor {
        mode: ColorScheme,
        token: &'static str,
        value: String,
    },

    #[error("Unsupported theme version. Expected version 1")]
    UnsupportedVersion,

    #[error("Theme name is required")]
    MissingName,

    #[error("Theme base must be an object with a \"type\"")]
    InvalidBase,

    #[error("Preset base requires a preset name in \"value\"")]
    MissingPresetValue,

    #[error("Imported base is invalid: {0}")]
    InvalidImportedBase(Box<ValidationError>),

    #[error("Unknown base type \"{0}\". Expected \"preset\" or \"imported\"")]
    UnknownBaseType(String),

    #[error("Theme overrides must be an object")]
    InvalidOverrides,

    #[error("Overrides for \"{group}\" must be an object")]
    OverrideGroupNotObject { group: &'static str },

    #[error("Override \"{token}\" in \"{group}\" must be a string")]
    OverrideNotString { group: &'static str, token: String },
}

/// Why an import was rejected. Nothing is applied when this is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Invalid CSS at line {line}: {message}")]
    CssSyntax { line: usize, message: String },

    #[error("CSS must contain a {0} block")]
    MissingBlock(&'static str),

    #[error("Theme name is required")]
    MissingName,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode stored value")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}
