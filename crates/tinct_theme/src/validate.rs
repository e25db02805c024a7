//! Field and structure validators
//!
//! Every validator returns a [`Validation`] and never panics, whatever the
//! input. Empty input means "use the default" for optional numeric fields,
//! but is rejected for required ones (colors, radius).
//!
//! The structural validators check invariants in a fixed order and report
//! the first one violated.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map_res, opt, recognize, value},
    sequence::{pair, tuple},
    IResult,
};
use serde_json::{Map, Value};
use tinct_core::CssColor;

use crate::error::ValidationError;
use crate::theme::ColorScheme;
use crate::tokens::{ColorToken, StyleKind, StyleToken};

pub type Validation = Result<(), ValidationError>;

/// Shadow component selector for [`validate_shadow`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowPart {
    Opacity,
    Blur,
    Spread,
    Offset,
}

/// HSL adjustment channel for [`validate_hsl_adjustment`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HslChannel {
    Hue,
    Saturation,
    Lightness,
}

pub fn validate_color(value: &str) -> Validation {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field: "Color" });
    }
    match CssColor::parse(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidColor),
    }
}

pub fn validate_radius(value: &str) -> Validation {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field: "Radius" });
    }
    non_negative_length(value, "Radius")
}

pub fn validate_spacing(value: &str) -> Validation {
    if value.trim().is_empty() {
        return Ok(());
    }
    non_negative_length(value, "Spacing")
}

pub fn validate_shadow(part: ShadowPart, value: &str) -> Validation {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    let field = match part {
        ShadowPart::Opacity => {
            return match value.parse::<f64>() {
                Ok(v) if v.is_finite() && (0.0..=1.0).contains(&v) => Ok(()),
                _ => Err(ValidationError::InvalidOpacity),
            };
        }
        ShadowPart::Blur => "shadow blur",
        ShadowPart::Spread => "shadow spread",
        ShadowPart::Offset => "shadow offset",
    };

    // Shadow lengths may be negative, unlike radius and spacing
    match parse_length(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidLength { field }),
    }
}

pub fn validate_hsl_adjustment(channel: HslChannel, value: &str) -> Validation {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    let field = match channel {
        HslChannel::Hue => "Hue shift",
        HslChannel::Saturation => "Saturation multiplier",
        HslChannel::Lightness => "Lightness multiplier",
    };

    let number = match value.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return Err(ValidationError::NotANumber { field }),
    };

    if channel != HslChannel::Hue && number < 0.0 {
        return Err(ValidationError::NegativeMultiplier { field });
    }
    Ok(())
}

/// Validate a value for a mode-independent token according to its [`StyleKind`].
pub fn validate_style(token: StyleToken, value: &str) -> Validation {
    match token.kind() {
        StyleKind::Radius => validate_radius(value),
        StyleKind::Spacing => validate_spacing(value),
        StyleKind::Color => validate_color(value),
        StyleKind::ShadowOpacity => validate_shadow(ShadowPart::Opacity, value),
        StyleKind::ShadowBlur => validate_shadow(ShadowPart::Blur, value),
        StyleKind::ShadowSpread => validate_shadow(ShadowPart::Spread, value),
        StyleKind::ShadowOffset => validate_shadow(ShadowPart::Offset, value),
        StyleKind::HueShift => validate_hsl_adjustment(HslChannel::Hue, value),
        StyleKind::SaturationMult => validate_hsl_adjustment(HslChannel::Saturation, value),
        StyleKind::LightnessMult => validate_hsl_adjustment(HslChannel::Lightness, value),
        StyleKind::FontFamily => {
            if value.trim().is_empty() {
                Err(ValidationError::Required {
                    field: "Font family",
                })
            } else {
                Ok(())
            }
        }
        StyleKind::Tracking => match value.trim() {
            "" => Ok(()),
            v => parse_length(v)
                .map(|_| ())
                .ok_or(ValidationError::InvalidLength { field: "tracking" }),
        },
    }
}

fn non_negative_length(value: &str, field: &'static str) -> Validation {
    match parse_length(value) {
        Some(v) if v < 0.0 => Err(ValidationError::NegativeLength { field }),
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidLength { field }),
    }
}

/// Signed magnitude of `<number><unit>` or bare `0`
fn parse_length(value: &str) -> Option<f64> {
    all_consuming(length)(value.trim())
        .ok()
        .map(|(_, magnitude)| magnitude)
}

fn length(input: &str) -> IResult<&str, f64> {
    alt((
        map_res(
            pair(
                recognize(tuple((
                    opt(one_of("+-")),
                    alt((
                        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                        recognize(pair(char('.'), digit1)),
                    )),
                ))),
                length_unit,
            ),
            |(number, _): (&str, &str)| number.parse::<f64>(),
        ),
        value(0.0, tag("0")),
    ))(input)
}

fn length_unit(input: &str) -> IResult<&str, &str> {
    alt((
        tag("px"),
        tag("rem"),
        tag("em"),
        tag("ch"),
        tag("ex"),
        tag("vh"),
        tag("vw"),
        tag("vmin"),
        tag("vmax"),
        tag("%"),
    ))(input)
}

/// Structural check of an imported light/dark theme.
///
/// Both modes must be objects holding valid colors for every
/// [`ColorToken::REQUIRED`] token. Other entries are accepted unchecked.
pub fn validate_imported_theme(theme: &Value) -> Validation {
    let Some(theme) = theme.as_object() else {
        return Err(ValidationError::NotAnObject);
    };

    let (Some(light), Some(dark)) = (theme.get("light"), theme.get("dark")) else {
        return Err(ValidationError::MissingModes);
    };

    let modes = [(ColorScheme::Light, light), (ColorScheme::Dark, dark)];
    let mut objects = Vec::with_capacity(2);
    for (mode, tokens) in modes {
        match tokens.as_object() {
            Some(map) => objects.push((mode, map)),
            None => return Err(ValidationError::ModeNotObject { mode }),
        }
    }

    for (mode, tokens) in objects {
        check_required_colors(mode, tokens)?;
    }
    Ok(())
}

fn check_required_colors(mode: ColorScheme, tokens: &Map<String, Value>) -> Validation {
    for token in ColorToken::REQUIRED {
        let name = token.name();
        let Some(raw) = tokens.get(name) else {
            return Err(ValidationError::MissingRequiredColor { mode, token: name });
        };
        let valid = raw.as_str().is_some_and(|v| validate_color(v).is_ok());
        if !valid {
            return Err(ValidationError::InvalidRequiredColor {
                mode,
                token: name,
                value: match raw {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            });
        }
    }
    Ok(())
}

/// Structural check of a version 1 custom theme artifact.
///
/// Order: version, name, base, overrides. Override values only need to be
/// strings here; they are checked individually when edited.
pub fn validate_custom_theme(artifact: &Value) -> Validation {
    let Some(artifact) = artifact.as_object() else {
        return Err(ValidationError::NotAnObject);
    };

    let version_ok = artifact
        .get("version")
        .and_then(Value::as_u64)
        .is_some_and(|v| v == 1);
    if !version_ok {
        return Err(ValidationError::UnsupportedVersion);
    }

    let name_ok = artifact
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|n| !n.trim().is_empty());
    if !name_ok {
        return Err(ValidationError::MissingName);
    }

    validate_base(artifact.get("base"))?;
    validate_overrides(artifact.get("overrides"))
}

fn validate_base(base: Option<&Value>) -> Validation {
    let Some(base) = base.and_then(Value::as_object) else {
        return Err(ValidationError::InvalidBase);
    };

    match base.get("type").and_then(Value::as_str) {
        Some("preset") => match base.get("value").and_then(Value::as_str) {
            Some(v) if !v.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::MissingPresetValue),
        },
        Some("imported") => {
            let theme = base.get("theme").unwrap_or(&Value::Null);
            validate_imported_theme(theme)
                .map_err(|e| ValidationError::InvalidImportedBase(Box::new(e)))
        }
        Some(other) => Err(ValidationError::UnknownBaseType(other.to_string())),
        None => Err(ValidationError::InvalidBase),
    }
}

fn validate_overrides(overrides: Option<&Value>) -> Validation {
    let Some(overrides) = overrides.and_then(Value::as_object) else {
        return Err(ValidationError::InvalidOverrides);
    };

    for group in ["light", "dark", "other"] {
        let Some(entries) = overrides.get(group) else {
            continue;
        };
        let Some(entries) = entries.as_object() else {
            return Err(ValidationError::OverrideGroupNotObject { group });
        };
        if let Some((token, _)) = entries.iter().find(|(_, v)| !v.is_string()) {
            return Err(ValidationError::OverrideNotString {
                group,
                token: token.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn color_validator() {
        for ok in [
            "#fff",
            "#A1B2C3",
            "rgb(0, 0, 0)",
            "rgba(0, 0, 0, 0.5)",
            "hsl(210 40% 98%)",
            "hsla(210, 40%, 98%, 0.1)",
            "oklch(0.985 0 0)",
            "oklch(98.5% 0.01 240)",
            "var(--primary)",
            "transparent",
            "currentColor",
        ] {
            assert_eq!(validate_color(ok), Ok(()), "{ok}");
        }

        assert_eq!(
            validate_color(""),
            Err(ValidationError::Required { field: "Color" })
        );
        assert_eq!(validate_color("blue-ish"), Err(ValidationError::InvalidColor));
    }

    #[test]
    fn radius_and_spacing() {
        assert_eq!(validate_radius("0.5rem"), Ok(()));
        assert_eq!(validate_radius("0"), Ok(()));
        assert_eq!(validate_radius("12%"), Ok(()));
        assert_eq!(
            validate_radius(""),
            Err(ValidationError::Required { field: "Radius" })
        );
        assert_eq!(
            validate_radius("-1px"),
            Err(ValidationError::NegativeLength { field: "Radius" })
        );
        assert_eq!(
            validate_radius("5"),
            Err(ValidationError::InvalidLength { field: "Radius" })
        );
        assert_eq!(
            validate_radius("5pt"),
            Err(ValidationError::InvalidLength { field: "Radius" })
        );

        assert_eq!(validate_spacing(""), Ok(()));
        assert_eq!(validate_spacing("0.25rem"), Ok(()));
        assert_eq!(
            validate_spacing("-0.25rem"),
            Err(ValidationError::NegativeLength { field: "Spacing" })
        );
    }

    #[test]
    fn shadow_parts() {
        assert_eq!(validate_shadow(ShadowPart::Opacity, "0.4"), Ok(()));
        assert_eq!(validate_shadow(ShadowPart::Opacity, ""), Ok(()));
        assert_eq!(
            validate_shadow(ShadowPart::Opacity, "1.5"),
            Err(ValidationError::InvalidOpacity)
        );
        assert_eq!(validate_shadow(ShadowPart::Blur, "4px"), Ok(()));
        assert_eq!(validate_shadow(ShadowPart::Offset, "-2px"), Ok(()));
        assert_eq!(validate_shadow(ShadowPart::Spread, "-1px"), Ok(()));
        assert!(validate_shadow(ShadowPart::Blur, "four").is_err());
    }

    #[test]
    fn hsl_adjustments() {
        assert_eq!(validate_hsl_adjustment(HslChannel::Hue, "-720"), Ok(()));
        assert_eq!(validate_hsl_adjustment(HslChannel::Saturation, ""), Ok(()));
        assert_eq!(validate_hsl_adjustment(HslChannel::Lightness, "1.5"), Ok(()));
        assert_eq!(
            validate_hsl_adjustment(HslChannel::Saturation, "-0.1"),
            Err(ValidationError::NegativeMultiplier {
                field: "Saturation multiplier"
            })
        );
        assert_eq!(
            validate_hsl_adjustment(HslChannel::Hue, "inf"),
            Err(ValidationError::NotANumber { field: "Hue shift" })
        );
    }

    #[test]
    fn style_dispatch() {
        assert!(validate_style(StyleToken::Radius, "1rem").is_ok());
        assert!(validate_style(StyleToken::ShadowColor, "nope").is_err());
        assert!(validate_style(StyleToken::FontSans, "  ").is_err());
        assert!(validate_style(StyleToken::FontMono, "\"JetBrains Mono\", monospace").is_ok());
        assert!(validate_style(StyleToken::TrackingNormal, "-0.025em").is_ok());
    }

    fn imported() -> Value {
        json!({
            "light": {
                "background": "#ffffff",
                "foreground": "#0a0a0a",
                "primary": "#171717",
                "primary-foreground": "#ffffff",
                "anything-else": 42
            },
            "dark": {
                "background": "#0a0a0a",
                "foreground": "#fafafa",
                "primary": "#e5e5e5",
                "primary-foreground": "#0a0a0a"
            }
        })
    }

    #[test]
    fn imported_theme_structure() {
        assert_eq!(validate_imported_theme(&imported()), Ok(()));

        let mut missing = imported();
        missing["dark"].as_object_mut().unwrap().remove("primary");
        assert_eq!(
            validate_imported_theme(&missing),
            Err(ValidationError::MissingRequiredColor {
                mode: ColorScheme::Dark,
                token: "primary"
            })
        );

        let mut bad = imported();
        bad["light"]["foreground"] = json!("nope");
        assert!(matches!(
            validate_imported_theme(&bad),
            Err(ValidationError::InvalidRequiredColor {
                mode: ColorScheme::Light,
                ..
            })
        ));

        assert_eq!(
            validate_imported_theme(&json!({ "light": {} })),
            Err(ValidationError::MissingModes)
        );
        assert_eq!(
            validate_imported_theme(&json!({ "light": {}, "dark": [] })),
            Err(ValidationError::ModeNotObject {
                mode: ColorScheme::Dark
            })
        );
    }

    #[test]
    fn artifact_version_checked_first() {
        let artifact = json!({ "version": 2, "name": "", "base": null });
        assert_eq!(
            validate_custom_theme(&artifact),
            Err(ValidationError::UnsupportedVersion)
        );
    }

    #[test]
    fn artifact_checks() {
        let ok = json!({
            "version": 1,
            "name": "X",
            "base": { "type": "preset", "value": "neutral" },
            "overrides": { "light": { "primary": "#000" }, "other": { "unknown-token": "1" } }
        });
        assert_eq!(validate_custom_theme(&ok), Ok(()));

        let mut no_name = ok.clone();
        no_name["name"] = json!("  ");
        assert_eq!(
            validate_custom_theme(&no_name),
            Err(ValidationError::MissingName)
        );

        let mut bad_type = ok.clone();
        bad_type["base"] = json!({ "type": "remote", "value": "x" });
        assert_eq!(
            validate_custom_theme(&bad_type),
            Err(ValidationError::UnknownBaseType("remote".to_string()))
        );

        let mut imported_base = ok.clone();
        imported_base["base"] = json!({ "type": "imported", "theme": imported() });
        assert_eq!(validate_custom_theme(&imported_base), Ok(()));

        let mut broken_import = ok.clone();
        broken_import["base"] = json!({ "type": "imported" });
        assert!(matches!(
            validate_custom_theme(&broken_import),
            Err(ValidationError::InvalidImportedBase(_))
        ));

        let mut non_string = ok.clone();
        non_string["overrides"]["dark"] = json!({ "primary": 1 });
        assert_eq!(
            validate_custom_theme(&non_string),
            Err(ValidationError::OverrideNotString {
                group: "dark",
                token: "primary".to_string()
            })
        );

        let mut no_overrides = ok;
        no_overrides.as_object_mut().unwrap().remove("overrides");
        assert_eq!(
            validate_custom_theme(&no_overrides),
            Err(ValidationError::InvalidOverrides)
        );
    }
}
