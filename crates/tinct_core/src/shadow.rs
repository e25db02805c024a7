//! Box-shadow value composition

use crate::syntax::CssColor;

/// Opacity used when the supplied value is not a number
pub const DEFAULT_SHADOW_OPACITY: f64 = 0.1;

/// Parse an opacity string, clamped to `[0, 1]`, defaulting to
/// [`DEFAULT_SHADOW_OPACITY`] when it is not a finite number.
pub fn parse_opacity(opacity: &str) -> f64 {
    match opacity.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => DEFAULT_SHADOW_OPACITY,
    }
}

/// Render `color` at the given opacity.
///
/// Hex and `rgb()` become `rgba(r, g, b, a)`, `hsl()` and `oklch()` keep their
/// color space with a `/ a` alpha. Anything else falls back to black.
pub fn color_with_opacity(color: &str, opacity: f64) -> String {
    match CssColor::parse(color) {
        Some(CssColor::Hex(rgb)) | Some(CssColor::Rgb { rgb, .. }) => {
            format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, opacity)
        }
        Some(CssColor::Hsl { hsl, .. }) => {
            format!("hsl({} {}% {}% / {})", hsl.h, hsl.s, hsl.l, opacity)
        }
        Some(CssColor::Oklch {
            lightness,
            lightness_percent,
            chroma,
            hue,
            ..
        }) => {
            let pct = if lightness_percent { "%" } else { "" };
            format!("oklch({lightness}{pct} {chroma} {hue} / {opacity})")
        }
        _ => format!("rgba(0, 0, 0, {})", opacity),
    }
}

/// Compose `"<x> <y> <blur> <spread> <color>"` from shadow component tokens.
pub fn build_shadow_value(
    color: &str,
    opacity: &str,
    blur: &str,
    spread: &str,
    offset_x: &str,
    offset_y: &str,
) -> String {
    let color = color_with_opacity(color, parse_opacity(opacity));
    format!(
        "{} {} {} {} {}",
        offset_x.trim(),
        offset_y.trim(),
        blur.trim(),
        spread.trim(),
        color
    )
}
