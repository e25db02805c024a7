//! Durable theme state
//!
//! Three independent slots are kept per namespace:
//!
//! - `<ns>.theme`: the active selection, a preset key or `custom`
//! - `<ns>.radius`: the active radius string
//! - `<ns>.custom-theme`: the active custom artifact as JSON
//!
//! Storage failures never reach callers. [`ThemePersistence`] logs them and
//! behaves as if nothing was stored, so theming keeps working without
//! persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::artifact::CustomThemeArtifact;
use crate::error::StorageError;

/// Stored value of the selection slot when a custom theme is active
pub const CUSTOM_SELECTION: &str = "custom";

/// Key-value string storage
pub trait ThemeStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: ThemeStorage + ?Sized> ThemeStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<FxHashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that fails every call, like a browser in privacy mode
    pub fn unavailable() -> Self {
        Self {
            values: RwLock::default(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl ThemeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        let mut file: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
                _ => '_',
            })
            .collect();
        // "", "." and ".." must never name the directory or its parent
        if file.chars().all(|c| c == '.') {
            file.insert(0, '_');
        }
        self.dir.join(file)
    }
}

impl ThemeStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, value))
            .map_err(|source| StorageError::Write { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }
}

/// The persisted theme selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeSelection {
    Preset(String),
    Custom,
}

impl ThemeSelection {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            CUSTOM_SELECTION => Self::Custom,
            key => Self::Preset(key.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Preset(key) => key,
            Self::Custom => CUSTOM_SELECTION,
        }
    }
}

/// The three theme slots over a [`ThemeStorage`]
#[derive(Debug)]
pub struct ThemePersistence<S> {
    storage: S,
    namespace: String,
}

impl<S: ThemeStorage> ThemePersistence<S> {
    pub fn new(storage: S, namespace: impl Into<String>) -> Self {
        Self {
            storage,
            namespace: namespace.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn key(&self, slot: &str) -> String {
        format!("{}.{}", self.namespace, slot)
    }

    pub fn selection_key(&self) -> String {
        self.key("theme")
    }

    pub fn radius_key(&self) -> String {
        self.key("radius")
    }

    pub fn custom_theme_key(&self) -> String {
        self.key("custom-theme")
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                tracing::warn!("failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!("failed to persist {}: {}", key, e);
        }
    }

    fn clear(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            tracing::warn!("failed to clear {}: {}", key, e);
        }
    }

    pub fn load_selection(&self) -> Option<ThemeSelection> {
        self.read(&self.selection_key())
            .map(|v| ThemeSelection::parse(&v))
    }

    pub fn save_selection(&self, selection: &ThemeSelection) {
        self.write(&self.selection_key(), selection.as_str());
    }

    pub fn load_radius(&self) -> Option<String> {
        self.read(&self.radius_key()).map(|v| v.trim().to_string())
    }

    pub fn save_radius(&self, radius: &str) {
        self.write(&self.radius_key(), radius);
    }

    pub fn clear_radius(&self) {
        self.clear(&self.radius_key());
    }

    /// Load the stored artifact. Corrupt or invalid data is treated as absent.
    pub fn load_custom_theme(&self) -> Option<CustomThemeArtifact> {
        let key = self.custom_theme_key();
        let json = self.read(&key)?;
        match CustomThemeArtifact::from_json(&json) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                tracing::warn!("ignoring stored custom theme {}: {}", key, e);
                None
            }
        }
    }

    pub fn save_custom_theme(&self, artifact: &CustomThemeArtifact) {
        let key = self.custom_theme_key();
        match serde_json::to_string(artifact) {
            Ok(json) => self.write(&key, &json),
            Err(e) => tracing::warn!("failed to encode custom theme: {}", StorageError::from(e)),
        }
    }

    pub fn clear_custom_theme(&self) {
        self.clear(&self.custom_theme_key());
    }
}
