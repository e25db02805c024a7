//! Tinct Core
//!
//! Color primitives for the Tinct theme engine:
//!
//! - **Color values**: [`Rgb`] and [`Hsl`] with hex encoding and lossless conversion
//! - **CSS syntax**: [`CssColor`] recognizes hex, `rgb()`, `hsl()`, `oklch()`,
//!   `var(--name)` and color keywords
//! - **Adjustments**: [`apply_hsl_adjustments`] shifts hue and scales
//!   saturation/lightness while leaving indirections untouched
//! - **Shadows**: [`build_shadow_value`] composes box-shadow strings from
//!   component tokens
//!
//! # Example
//!
//! ```rust
//! use tinct_core::{apply_hsl_adjustments, build_shadow_value, hex_to_hsl};
//!
//! let hsl = hex_to_hsl("#ff0000").unwrap();
//! assert_eq!(hsl.h, 0.0);
//!
//! assert_eq!(apply_hsl_adjustments("#ff0000", 180.0, 1.0, 1.0), "#00ffff");
//! assert_eq!(apply_hsl_adjustments("var(--primary)", 180.0, 1.0, 1.0), "var(--primary)");
//!
//! assert_eq!(
//!     build_shadow_value("#000000", "0.2", "4px", "0px", "0px", "2px"),
//!     "0px 2px 4px 0px rgba(0, 0, 0, 0.2)"
//! );
//! ```

pub mod adjust;
pub mod color;
pub mod shadow;
pub mod syntax;

pub use adjust::{apply_hsl_adjustments, HslAdjustment};
pub use color::{hex_to_hsl, hsl_to_hex, Hsl, Rgb};
pub use shadow::{build_shadow_value, color_with_opacity, parse_opacity, DEFAULT_SHADOW_OPACITY};
pub use syntax::CssColor;
