//! Theme resolution
//!
//! Flattens a base plus overrides into one token map per mode. Resolution is
//! pure: no I/O and the same inputs always produce the same map, in the
//! same order.

use tinct_core::HslAdjustment;

use crate::artifact::{ThemeBase, ThemeOverrides};
use crate::presets::PresetRegistry;
use crate::theme::{ColorScheme, ResolvedTheme};
use crate::tokens::{derive_shadows, StyleToken, TokenMap};

/// Resolve the token map for one mode.
///
/// Layers, later wins:
/// 1. the base map for `scheme`, with mode-independent defaults filling gaps
/// 2. `overrides.other`
/// 3. `overrides[scheme]`
///
/// The resolved HSL adjustment is then applied to every color token and the
/// derived shadows are appended.
pub fn resolve(
    base: &ThemeBase,
    overrides: &ThemeOverrides,
    scheme: ColorScheme,
    registry: &PresetRegistry,
) -> TokenMap {
    let mut tokens = match base {
        ThemeBase::Preset { value } => {
            let preset = registry.resolve_or_default(value);
            let mut tokens = preset.colors(scheme).clone();
            tokens.merge_missing(preset.defaults());
            tokens
        }
        ThemeBase::Imported { theme } => {
            let mut tokens = theme.for_scheme(scheme).clone();
            tokens.merge_missing(registry.default_preset().defaults());
            tokens
        }
    };

    tokens.merge(&overrides.other);
    tokens.merge(overrides.for_scheme(scheme));

    let adjustment = hsl_adjustment(&tokens);
    if !adjustment.is_identity() {
        tracing::trace!(?adjustment, %scheme, "adjusting theme colors");
        tokens.map_colors(|_, value| adjustment.apply(value));
    }

    derive_shadows(&mut tokens);
    tokens
}

/// Resolve both modes.
pub fn resolve_theme(
    base: &ThemeBase,
    overrides: &ThemeOverrides,
    registry: &PresetRegistry,
) -> ResolvedTheme {
    ResolvedTheme {
        light: resolve(base, overrides, ColorScheme::Light, registry),
        dark: resolve(base, overrides, ColorScheme::Dark, registry),
    }
}

/// Read the adjustment inputs from a merged map; unparseable or missing
/// values use the neutral value for that channel.
pub fn hsl_adjustment(tokens: &TokenMap) -> HslAdjustment {
    let read = |token: StyleToken, neutral: f64| {
        tokens
            .get(token)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(neutral)
    };

    HslAdjustment {
        hue_shift: read(StyleToken::HueShift, 0.0),
        saturation_mult: read(StyleToken::SaturationMult, 1.0),
        lightness_mult: read(StyleToken::LightnessMult, 1.0),
    }
}
