//! Mode-independent style tokens

token_enum! {
    /// Tokens with a single value regardless of light/dark mode
    pub enum StyleToken {
        Radius => "radius",
        Spacing => "spacing",

        // Shadow parts
        ShadowColor => "shadow-color",
        ShadowOpacity => "shadow-opacity",
        ShadowBlur => "shadow-blur",
        ShadowSpread => "shadow-spread",
        ShadowOffsetX => "shadow-offset-x",
        ShadowOffsetY => "shadow-offset-y",

        // Global HSL adjustment inputs
        HueShift => "hue-shift",
        SaturationMult => "saturation-mult",
        LightnessMult => "lightness-mult",

        // Typography
        FontSans => "font-sans",
        FontSerif => "font-serif",
        FontMono => "font-mono",
        TrackingNormal => "tracking-normal",
    }
}

/// Which validation rule governs a style token's value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleKind {
    Radius,
    Spacing,
    Color,
    ShadowOpacity,
    ShadowBlur,
    ShadowSpread,
    ShadowOffset,
    HueShift,
    SaturationMult,
    LightnessMult,
    FontFamily,
    Tracking,
}

impl StyleToken {
    pub fn kind(self) -> StyleKind {
        match self {
            Self::Radius => StyleKind::Radius,
            Self::Spacing => StyleKind::Spacing,
            Self::ShadowColor => StyleKind::Color,
            Self::ShadowOpacity => StyleKind::ShadowOpacity,
            Self::ShadowBlur => StyleKind::ShadowBlur,
            Self::ShadowSpread => StyleKind::ShadowSpread,
            Self::ShadowOffsetX | Self::ShadowOffsetY => StyleKind::ShadowOffset,
            Self::HueShift => StyleKind::HueShift,
            Self::SaturationMult => StyleKind::SaturationMult,
            Self::LightnessMult => StyleKind::LightnessMult,
            Self::FontSans | Self::FontSerif | Self::FontMono => StyleKind::FontFamily,
            Self::TrackingNormal => StyleKind::Tracking,
        }
    }

    pub fn is_font(self) -> bool {
        self.kind() == StyleKind::FontFamily
    }
}
