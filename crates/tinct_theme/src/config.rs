//! Engine configuration (tinct.toml)
//!
//! ```toml
//! storage_namespace = "my-app"
//! default_preset = "zinc"
//!
//! [fonts]
//! timeout_ms = 5000
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::presets::DEFAULT_PRESET;

/// Top-level engine configuration. Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Prefix of the three persisted slots, e.g. `tinct.theme`
    #[serde(default = "default_namespace")]
    pub storage_namespace: String,
    /// Preset used for unknown keys and a first run
    #[serde(default = "default_preset")]
    pub default_preset: String,
    /// Prepended to token names when writing to the style surface
    #[serde(default = "default_property_prefix")]
    pub property_prefix: String,
    #[serde(default)]
    pub fonts: FontConfig,
}

fn default_namespace() -> String {
    "tinct".to_string()
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}

fn default_property_prefix() -> String {
    "--".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_namespace: default_namespace(),
            default_preset: default_preset(),
            property_prefix: default_property_prefix(),
            fonts: FontConfig::default(),
        }
    }
}

/// Web font loading
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FontConfig {
    /// How long to wait for a font to become available
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl FontConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Never zero, so polling always yields
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
