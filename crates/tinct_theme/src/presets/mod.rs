//! Built-in theme presets inspired by shadcn base color presets.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;

use crate::theme::ColorScheme;
use crate::tokens::*;

/// Key of the preset used when a reference cannot be resolved
pub const DEFAULT_PRESET: &str = "neutral";

/// Built-in preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinPreset {
    /// shadcn-inspired neutral preset (the default).
    Neutral,
    /// shadcn-inspired slate preset.
    Slate,
    /// shadcn-inspired zinc preset.
    Zinc,
    /// shadcn-inspired stone preset.
    Stone,
}

impl BuiltinPreset {
    /// Stable preset id for storage/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
            Self::Stone => "stone",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Slate => "Slate",
            Self::Zinc => "Zinc",
            Self::Stone => "Stone",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [BuiltinPreset] {
        const PRESETS: [BuiltinPreset; 4] = [
            BuiltinPreset::Neutral,
            BuiltinPreset::Slate,
            BuiltinPreset::Zinc,
            BuiltinPreset::Stone,
        ];
        &PRESETS
    }

    /// Build the complete preset.
    pub fn preset(self) -> Preset {
        let (light, dark, radius) = match self {
            Self::Neutral => (neutral_light(), neutral_dark(), "0.625rem"),
            Self::Slate => (slate_light(), slate_dark(), "0.5rem"),
            Self::Zinc => (zinc_light(), zinc_dark(), "0.625rem"),
            Self::Stone => (stone_light(), stone_dark(), "0.75rem"),
        };

        let mut defaults = default_styles();
        defaults.insert(StyleToken::Radius, radius);

        Preset::new(
            self.id(),
            self.display_name(),
            build_colors(light, ColorScheme::Light),
            build_colors(dark, ColorScheme::Dark),
            defaults,
        )
    }
}

impl Display for BuiltinPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An immutable named bundle of complete light/dark color maps plus
/// defaults for the mode-independent tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    key: String,
    label: String,
    light: TokenMap,
    dark: TokenMap,
    defaults: TokenMap,
}

impl Preset {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        light: TokenMap,
        dark: TokenMap,
        defaults: TokenMap,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            light,
            dark,
            defaults,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn colors(&self, scheme: ColorScheme) -> &TokenMap {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// Mode-independent token defaults
    pub fn defaults(&self) -> &TokenMap {
        &self.defaults
    }

    /// Whether every color token is present in both modes
    pub fn is_complete(&self) -> bool {
        ColorToken::ALL
            .iter()
            .all(|t| self.light.contains(*t) && self.dark.contains(*t))
    }
}

/// Process-wide preset lookup, built once and never mutated.
///
/// Keys are deduplicated at construction: the first preset with a given key
/// wins and later duplicates are dropped with a warning.
#[derive(Clone, Debug)]
pub struct PresetRegistry {
    presets: Vec<Preset>,
    index: FxHashMap<String, usize>,
    default_key: String,
    fallback: Preset,
}

impl PresetRegistry {
    /// Build a registry from an ordered preset list.
    pub fn new(presets: impl IntoIterator<Item = Preset>) -> Self {
        let mut registry = Self {
            presets: Vec::new(),
            index: FxHashMap::default(),
            default_key: DEFAULT_PRESET.to_string(),
            fallback: BuiltinPreset::Neutral.preset(),
        };
        for preset in presets {
            registry.push(preset);
        }
        registry
    }

    /// The built-in presets only
    pub fn builtin() -> Self {
        Self::new(BuiltinPreset::all().iter().map(|p| p.preset()))
    }

    /// Built-ins followed by `extra`. Built-ins keep their keys.
    pub fn with_extra(extra: impl IntoIterator<Item = Preset>) -> Self {
        Self::new(
            BuiltinPreset::all()
                .iter()
                .map(|p| p.preset())
                .chain(extra),
        )
    }

    /// Use `key` as the fallback preset. Unknown keys keep the current default.
    pub fn with_default_key(mut self, key: &str) -> Self {
        if self.index.contains_key(key) {
            self.default_key = key.to_string();
        } else {
            tracing::warn!("default preset {:?} is not registered; keeping {:?}", key, self.default_key);
        }
        self
    }

    fn push(&mut self, preset: Preset) {
        if self.index.contains_key(preset.key()) {
            tracing::warn!("duplicate preset key {:?} ignored", preset.key());
            return;
        }
        if !preset.is_complete() {
            tracing::warn!("preset {:?} is missing color tokens; skipped", preset.key());
            return;
        }
        self.index.insert(preset.key.clone(), self.presets.len());
        self.presets.push(preset);
    }

    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.index.get(key).map(|&i| &self.presets[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    pub fn default_preset(&self) -> &Preset {
        self.get(&self.default_key).unwrap_or(&self.fallback)
    }

    /// Look up `key`, falling back to the default preset when it is unknown.
    pub fn resolve_or_default(&self, key: &str) -> &Preset {
        match self.get(key) {
            Some(preset) => preset,
            None => {
                tracing::debug!("unknown preset {:?}, using {:?}", key, self.default_key);
                self.default_preset()
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(Preset::key)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Mode-independent defaults shared by the built-in presets
pub fn default_styles() -> TokenMap {
    [
        (StyleToken::Radius, "0.625rem"),
        (StyleToken::Spacing, "0.25rem"),
        (StyleToken::ShadowColor, "#000000"),
        (StyleToken::ShadowOpacity, "0.1"),
        (StyleToken::ShadowBlur, "3px"),
        (StyleToken::ShadowSpread, "0px"),
        (StyleToken::ShadowOffsetX, "0px"),
        (StyleToken::ShadowOffsetY, "1px"),
        (StyleToken::HueShift, "0"),
        (StyleToken::SaturationMult, "1"),
        (StyleToken::LightnessMult, "1"),
        (StyleToken::FontSans, "ui-sans-serif, system-ui, sans-serif"),
        (StyleToken::FontSerif, "ui-serif, Georgia, Cambria, serif"),
        (StyleToken::FontMono, "ui-monospace, SFMono-Regular, Menlo, monospace"),
        (StyleToken::TrackingNormal, "0em"),
    ]
    .into_iter()
    .collect()
}

#[derive(Clone, Copy)]
struct BasePalette {
    background: &'static str,
    foreground: &'static str,
    card: &'static str,
    primary: &'static str,
    primary_foreground: &'static str,
    secondary: &'static str,
    muted: &'static str,
    muted_foreground: &'static str,
    accent: &'static str,
    destructive: &'static str,
    border: &'static str,
    ring: &'static str,
    sidebar: &'static str,
}

fn build_colors(base: BasePalette, scheme: ColorScheme) -> TokenMap {
    let charts = match scheme {
        ColorScheme::Light => ["#e76e50", "#2a9d90", "#274754", "#e8c468", "#f4a462"],
        ColorScheme::Dark => ["#2662d9", "#2eb88a", "#e88c30", "#af57db", "#e23670"],
    };

    use ColorToken::*;
    [
        (Background, base.background),
        (Foreground, base.foreground),
        (Card, base.card),
        (CardForeground, base.foreground),
        (Popover, base.card),
        (PopoverForeground, base.foreground),
        (Primary, base.primary),
        (PrimaryForeground, base.primary_foreground),
        (Secondary, base.secondary),
        (SecondaryForeground, base.primary),
        (Muted, base.muted),
        (MutedForeground, base.muted_foreground),
        (Accent, base.accent),
        (AccentForeground, base.primary),
        (Destructive, base.destructive),
        (DestructiveForeground, "#fafafa"),
        (Border, base.border),
        (Input, base.border),
        (Ring, base.ring),
        (Chart1, charts[0]),
        (Chart2, charts[1]),
        (Chart3, charts[2]),
        (Chart4, charts[3]),
        (Chart5, charts[4]),
        (Sidebar, base.sidebar),
        (SidebarForeground, base.foreground),
        (SidebarPrimary, base.primary),
        (SidebarPrimaryForeground, base.primary_foreground),
        (SidebarAccent, base.accent),
        (SidebarAccentForeground, base.primary),
        (SidebarBorder, base.border),
        (SidebarRing, base.ring),
    ]
    .into_iter()
    .collect()
}

fn neutral_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#0a0a0a",
        card: "#ffffff",
        primary: "#171717",
        primary_foreground: "#fafafa",
        secondary: "#f5f5f5",
        muted: "#f5f5f5",
        muted_foreground: "#737373",
        accent: "#f5f5f5",
        destructive: "#ef4444",
        border: "#e5e5e5",
        ring: "#0a0a0a",
        sidebar: "#fafafa",
    }
}

fn neutral_dark() -> BasePalette {
    BasePalette {
        background: "#0a0a0a",
        foreground: "#fafafa",
        card: "#0a0a0a",
        primary: "#fafafa",
        primary_foreground: "#171717",
        secondary: "#262626",
        muted: "#262626",
        muted_foreground: "#a3a3a3",
        accent: "#262626",
        destructive: "#7f1d1d",
        border: "#262626",
        ring: "#d4d4d4",
        sidebar: "#171717",
    }
}

fn slate_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#020817",
        card: "#ffffff",
        primary: "#0f172a",
        primary_foreground: "#f8fafc",
        secondary: "#f1f5f9",
        muted: "#f1f5f9",
        muted_foreground: "#64748b",
        accent: "#f1f5f9",
        destructive: "#ef4444",
        border: "#e2e8f0",
        ring: "#020817",
        sidebar: "#f8fafc",
    }
}

fn slate_dark() -> BasePalette {
    BasePalette {
        background: "#020817",
        foreground: "#f8fafc",
        card: "#020817",
        primary: "#f8fafc",
        primary_foreground: "#0f172a",
        secondary: "#1e293b",
        muted: "#1e293b",
        muted_foreground: "#94a3b8",
        accent: "#1e293b",
        destructive: "#7f1d1d",
        border: "#1e293b",
        ring: "#cbd5e1",
        sidebar: "#0f172a",
    }
}

fn zinc_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#09090b",
        card: "#ffffff",
        primary: "#18181b",
        primary_foreground: "#fafafa",
        secondary: "#f4f4f5",
        muted: "#f4f4f5",
        muted_foreground: "#71717a",
        accent: "#f4f4f5",
        destructive: "#ef4444",
        border: "#e4e4e7",
        ring: "#09090b",
        sidebar: "#fafafa",
    }
}

fn zinc_dark() -> BasePalette {
    BasePalette {
        background: "#09090b",
        foreground: "#fafafa",
        card: "#09090b",
        primary: "#fafafa",
        primary_foreground: "#18181b",
        secondary: "#27272a",
        muted: "#27272a",
        muted_foreground: "#a1a1aa",
        accent: "#27272a",
        destructive: "#7f1d1d",
        border: "#27272a",
        ring: "#d4d4d8",
        sidebar: "#18181b",
    }
}

fn stone_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#0c0a09",
        card: "#ffffff",
        primary: "#1c1917",
        primary_foreground: "#fafaf9",
        secondary: "#f5f5f4",
        muted: "#f5f5f4",
        muted_foreground: "#78716c",
        accent: "#f5f5f4",
        destructive: "#ef4444",
        border: "#e7e5e4",
        ring: "#0c0a09",
        sidebar: "#fafaf9",
    }
}

fn stone_dark() -> BasePalette {
    BasePalette {
        background: "#0c0a09",
        foreground: "#fafaf9",
        card: "#0c0a09",
        primary: "#fafaf9",
        primary_foreground: "#1c1917",
        secondary: "#292524",
        muted: "#292524",
        muted_foreground: "#a8a29e",
        accent: "#292524",
        destructive: "#7f1d1d",
        border: "#292524",
        ring: "#d6d3d1",
        sidebar: "#1c1917",
    }
}
