//! Shadow tokens for theming

use tinct_core::{build_shadow_value, color_with_opacity, parse_opacity};

use super::{StyleToken, TokenMap};

token_enum! {
    /// Shadows computed from the shadow part tokens; never set directly
    pub enum DerivedToken {
        ShadowSm => "shadow-sm",
        ShadowMd => "shadow-md",
        ShadowLg => "shadow-lg",
    }
}

/// The six shadow part tokens, as raw token strings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowParts {
    pub color: String,
    pub opacity: String,
    pub blur: String,
    pub spread: String,
    pub offset_x: String,
    pub offset_y: String,
}

impl ShadowParts {
    /// Read the parts from a resolved map, falling back to [`ShadowParts::default`]
    /// for any part that is missing.
    pub fn from_tokens(tokens: &TokenMap) -> Self {
        let defaults = Self::default();
        let part = |token: StyleToken, fallback: String| {
            tokens
                .get(token)
                .map(str::to_string)
                .unwrap_or(fallback)
        };

        Self {
            color: part(StyleToken::ShadowColor, defaults.color),
            opacity: part(StyleToken::ShadowOpacity, defaults.opacity),
            blur: part(StyleToken::ShadowBlur, defaults.blur),
            spread: part(StyleToken::ShadowSpread, defaults.spread),
            offset_x: part(StyleToken::ShadowOffsetX, defaults.offset_x),
            offset_y: part(StyleToken::ShadowOffsetY, defaults.offset_y),
        }
    }

    /// `"<x> <y> <blur> <spread> <color>"`
    pub fn base_layer(&self) -> String {
        build_shadow_value(
            &self.color,
            &self.opacity,
            &self.blur,
            &self.spread,
            &self.offset_x,
            &self.offset_y,
        )
    }

    /// A tighter layer under the base one, one pixel less spread.
    fn inner_layer(&self, offset_y: &str, blur: &str) -> String {
        let color = color_with_opacity(&self.color, parse_opacity(&self.opacity));
        format!(
            "{} {} {} {} {}",
            self.offset_x.trim(),
            offset_y,
            blur,
            reduced_spread(&self.spread),
            color
        )
    }
}

impl Default for ShadowParts {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            opacity: "0.1".to_string(),
            blur: "3px".to_string(),
            spread: "0px".to_string(),
            offset_x: "0px".to_string(),
            offset_y: "1px".to_string(),
        }
    }
}

fn reduced_spread(spread: &str) -> String {
    let spread = spread.trim();
    let number = spread.strip_suffix("px").unwrap_or(spread);
    match number.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{}px", v - 1.0),
        _ => "-1px".to_string(),
    }
}

impl DerivedToken {
    fn inner_offset(self) -> (&'static str, &'static str) {
        match self {
            Self::ShadowSm => ("1px", "2px"),
            Self::ShadowMd => ("2px", "4px"),
            Self::ShadowLg => ("4px", "6px"),
        }
    }

    /// Compose this shadow from the parts
    pub fn compose(self, parts: &ShadowParts) -> String {
        let (offset_y, blur) = self.inner_offset();
        format!("{}, {}", parts.base_layer(), parts.inner_layer(offset_y, blur))
    }
}

/// Write every derived shadow into `tokens`, computed from its shadow parts.
pub fn derive_shadows(tokens: &mut TokenMap) {
    let parts = ShadowParts::from_tokens(tokens);
    for token in DerivedToken::ALL {
        tokens.insert(*token, token.compose(&parts));
    }
}
