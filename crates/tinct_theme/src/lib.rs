//! Tinct Theme Engine
//!
//! Design tokens, presets and user customization, resolved into flat
//! `--token: value` maps for light and dark mode.
//!
//! # Overview
//!
//! The engine provides:
//! - **Design tokens**: Closed token enums for colors, mode-independent
//!   styles and derived shadows, plus an escape hatch for unknown tokens
//! - **Presets**: shadcn-inspired base palettes (neutral, slate, zinc, stone)
//! - **Validation**: Field-level validators with user-facing messages
//! - **Resolution**: Pure, deterministic merge of base, overrides and the
//!   global HSL adjustment
//! - **Import/Export**: Versioned JSON artifacts and `:root` / `.dark` CSS
//! - **Persistence**: Three storage slots that degrade silently when
//!   storage is unavailable
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tinct_theme::{
//!     ColorScheme, ColorToken, EngineConfig, MemoryStorage, PresetRegistry,
//!     RecordingSurface, StyleToken, ThemeController,
//! };
//!
//! let mut theme = ThemeController::new(
//!     Arc::new(PresetRegistry::builtin()),
//!     MemoryStorage::new(),
//!     RecordingSurface::new(),
//!     &EngineConfig::default(),
//! );
//! theme.restore();
//!
//! theme.set_color(ColorScheme::Light, ColorToken::Primary, "#0ea5e9").unwrap();
//! theme.set_style(StyleToken::Radius, "1rem").unwrap();
//! assert!(theme.set_style(StyleToken::Radius, "-1rem").is_err());
//!
//! assert_eq!(theme.surface().property("--primary"), Some("#0ea5e9"));
//! assert_eq!(theme.surface().property("--radius"), Some("1rem"));
//! ```
//!
//! # Resolution order
//!
//! For the requested mode, later layers win:
//!
//! 1. Base colors (preset or imported) and mode-independent defaults
//! 2. `overrides.other`
//! 3. `overrides.light` / `overrides.dark`
//!
//! The `hue-shift`, `saturation-mult` and `lightness-mult` tokens are then
//! applied to every color token, and `shadow-sm/md/lg` are derived from the
//! shadow parts.

pub mod artifact;
pub mod config;
pub mod css;
pub mod error;
pub mod fonts;
pub mod persist;
pub mod presets;
pub mod resolve;
pub mod state;
pub mod surface;
pub mod theme;
pub mod tokens;
pub mod validate;

// Re-export commonly used types
pub use artifact::{CustomThemeArtifact, ThemeBase, ThemeOverrides, ARTIFACT_VERSION};
pub use config::{EngineConfig, FontConfig};
pub use css::{export_css, parse_css_theme};
pub use error::{ConfigError, ImportError, StorageError, ValidationError};
pub use fonts::{primary_family, FontLoad, FontLoader, FontService};
pub use persist::{FileStorage, MemoryStorage, ThemePersistence, ThemeSelection, ThemeStorage};
pub use presets::{BuiltinPreset, Preset, PresetRegistry, DEFAULT_PRESET};
pub use resolve::{resolve, resolve_theme};
pub use state::{ThemeController, ThemeState};
pub use surface::{RecordingSurface, StyleSurface};
pub use theme::{ColorScheme, ImportedTheme, ResolvedTheme};
pub use tokens::*;
pub use validate::{
    validate_color, validate_custom_theme, validate_hsl_adjustment, validate_imported_theme,
    validate_radius, validate_shadow, validate_spacing, validate_style, HslChannel, ShadowPart,
    Validation,
};
