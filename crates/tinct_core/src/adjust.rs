//! Multiplicative/additive HSL adjustment of color values

use crate::color::{Hsl, Rgb};
use crate::syntax::CssColor;

/// Global HSL adjustment: hue shift in degrees, saturation and lightness multipliers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HslAdjustment {
    pub hue_shift: f64,
    pub saturation_mult: f64,
    pub lightness_mult: f64,
}

impl HslAdjustment {
    /// The adjustment that leaves every color untouched
    pub const IDENTITY: HslAdjustment = HslAdjustment::new(0.0, 1.0, 1.0);

    pub const fn new(hue_shift: f64, saturation_mult: f64, lightness_mult: f64) -> Self {
        Self {
            hue_shift,
            saturation_mult,
            lightness_mult,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Adjust a single HSL value. The hue is not wrapped here; encoding wraps it.
    pub fn adjust(&self, hsl: Hsl) -> Hsl {
        Hsl::new(
            hsl.h + self.hue_shift,
            clamp_percent(hsl.s * self.saturation_mult),
            clamp_percent(hsl.l * self.lightness_mult),
        )
    }

    /// Apply to a token value, see [`apply_hsl_adjustments`].
    pub fn apply(&self, value: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() || self.is_identity() || is_passthrough(trimmed) {
            return value.to_string();
        }

        // hex is accepted with or without the leading '#'
        let rgb = Rgb::from_hex(trimmed).or_else(|| {
            CssColor::parse(trimmed).and_then(|c| match c {
                CssColor::Rgb { rgb, .. } => Some(rgb),
                _ => None,
            })
        });

        match rgb {
            Some(rgb) => self.adjust(rgb.to_hsl()).to_hex(),
            None => {
                tracing::trace!("HSL adjustment skipped for non-RGB value {:?}", value);
                value.to_string()
            }
        }
    }
}

impl Default for HslAdjustment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

/// Indirections and keywords are never transformed
fn is_passthrough(value: &str) -> bool {
    value.starts_with("var(")
        || value.eq_ignore_ascii_case("transparent")
        || value.eq_ignore_ascii_case("currentcolor")
}

/// Shift hue and scale saturation/lightness of a hex or `rgb()`/`rgba()` value.
///
/// Empty values, `var(...)`, `transparent`, `currentColor` and anything that
/// does not parse come back unchanged. Successful adjustments are re-encoded
/// as lowercase 6-digit hex.
pub fn apply_hsl_adjustments(
    value: &str,
    hue_shift: f64,
    saturation_mult: f64,
    lightness_mult: f64,
) -> String {
    HslAdjustment::new(hue_shift, saturation_mult, lightness_mult).apply(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex_to_hsl;

    #[test]
    fn identity_returns_input_verbatim() {
        for v in ["#FFF", "#123456", "rgb(1, 2, 3)", "hsl(1 2% 3%)", "junk"] {
            assert_eq!(apply_hsl_adjustments(v, 0.0, 1.0, 1.0), v);
        }
    }

    #[test]
    fn passthrough_values() {
        for v in ["", "var(--primary)", "transparent", "currentColor", "oklch(0.5 0.1 20)"] {
            assert_eq!(apply_hsl_adjustments(v, 90.0, 0.5, 1.2), v);
        }
    }

    #[test]
    fn hue_shift_on_red() {
        let out = apply_hsl_adjustments("#ff0000", 180.0, 1.0, 1.0);
        assert_eq!(out, "#00ffff");
        let hsl = hex_to_hsl(&out).unwrap();
        assert!((hsl.h - 180.0).abs() < 1.0);
        assert!((hsl.s - 100.0).abs() < 0.5);
        assert!((hsl.l - 50.0).abs() < 0.5);
    }

    #[test]
    fn bare_hex_is_adjusted() {
        assert_eq!(apply_hsl_adjustments("ff0000", 180.0, 1.0, 1.0), "#00ffff");
        assert_eq!(apply_hsl_adjustments(" f00 ", 120.0, 1.0, 1.0), "#00ff00");
    }

    #[test]
    fn rgb_input_is_reencoded_as_hex() {
        assert_eq!(apply_hsl_adjustments("rgba(255, 0, 0, 0.4)", 120.0, 1.0, 1.0), "#00ff00");
    }

    #[test]
    fn multipliers_clamp() {
        assert_eq!(apply_hsl_adjustments("#808080", 0.0, 1.0, 10.0), "#ffffff");
        assert_eq!(apply_hsl_adjustments("#ff0000", 0.0, 0.0, 1.0), "#808080");
    }
}
