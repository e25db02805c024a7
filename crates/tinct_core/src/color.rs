//! RGB and HSL color values
//!
//! Conversions here are lossless in floating point; rounding only happens
//! when a value is encoded back to 8-bit channels.

use std::fmt;

/// 8-bit sRGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL color: hue in degrees, saturation and lightness in `[0, 100]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from floating point channels in `[0, 255]`, clamping and rounding.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        fn channel(v: f64) -> u8 {
            // `as` saturates and maps NaN to 0
            v.clamp(0.0, 255.0).round() as u8
        }
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Parse a 3- or 6-digit hex string, with or without a leading `#`.
    ///
    /// Any other length, or a non-hex digit, yields `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let pair = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut expanded = String::with_capacity(6);
                for c in digits.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                Some(Self::new(
                    pair(&expanded[0..2])?,
                    pair(&expanded[2..4])?,
                    pair(&expanded[4..6])?,
                ))
            }
            6 => Some(Self::new(
                pair(&digits[0..2])?,
                pair(&digits[2..4])?,
                pair(&digits[4..6])?,
            )),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(h * 60.0, s * 100.0, l * 100.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to 8-bit RGB.
    ///
    /// Hue wraps modulo 360 (negative values wrap positive); saturation and
    /// lightness are clamped to `[0, 100]`.
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = clamp_percent(self.s) / 100.0;
        let l = clamp_percent(self.l) / 100.0;

        if s == 0.0 {
            let v = l * 255.0;
            return Rgb::from_channels(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::from_channels(
            hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_channel(p, q, h) * 255.0,
            hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
        )
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parse a 3- or 6-digit hex color into HSL; `None` on any other input.
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    Rgb::from_hex(hex).map(Rgb::to_hsl)
}

/// Encode HSL components as a lowercase 6-digit hex string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Hsl::new(h, s, l).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("000000"), Some(Rgb::BLACK));
        assert_eq!(Rgb::from_hex("#1E66F5"), Some(Rgb::new(0x1e, 0x66, 0xf5)));
    }

    #[test]
    fn rejects_other_lengths() {
        assert_eq!(hex_to_hsl("#ffff"), None);
        assert_eq!(hex_to_hsl("#ff00ff00"), None);
        assert_eq!(hex_to_hsl(""), None);
        assert_eq!(hex_to_hsl("#ggg"), None);
        assert_eq!(hex_to_hsl("#é12"), None);
    }

    #[test]
    fn pure_red_is_hue_zero() {
        let hsl = hex_to_hsl("#ff0000").unwrap();
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 100.0);
        assert_eq!(hsl.l, 50.0);
    }

    #[test]
    fn hue_wraps_negative() {
        assert_eq!(hsl_to_hex(-360.0, 100.0, 50.0), "#ff0000");
        assert_eq!(hsl_to_hex(-240.0, 100.0, 50.0), "#00ff00");
        assert_eq!(hsl_to_hex(480.0, 100.0, 50.0), "#00ff00");
    }

    #[test]
    fn saturation_and_lightness_clamp() {
        assert_eq!(hsl_to_hex(0.0, 250.0, 50.0), "#ff0000");
        assert_eq!(hsl_to_hex(0.0, 100.0, 140.0), "#ffffff");
        assert_eq!(hsl_to_hex(0.0, -20.0, -5.0), "#000000");
    }

    #[test]
    fn gray_has_no_saturation() {
        let hsl = hex_to_hsl("#808080").unwrap();
        assert_eq!(hsl.s, 0.0);
        assert_eq!(Hsl::new(hsl.h, hsl.s, hsl.l).to_hex(), "#808080");
    }
}
