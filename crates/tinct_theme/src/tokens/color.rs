//! Color tokens for theming

token_enum! {
    /// Mode-scoped color tokens. Each has an independent light and dark value.
    ///
    /// [`ColorToken::ALL`] is the set of tokens HSL adjustments apply to.
    pub enum ColorToken {
        // Surfaces
        Background => "background",
        Foreground => "foreground",
        Card => "card",
        CardForeground => "card-foreground",
        Popover => "popover",
        PopoverForeground => "popover-foreground",

        // Brand colors
        Primary => "primary",
        PrimaryForeground => "primary-foreground",
        Secondary => "secondary",
        SecondaryForeground => "secondary-foreground",
        Muted => "muted",
        MutedForeground => "muted-foreground",
        Accent => "accent",
        AccentForeground => "accent-foreground",
        Destructive => "destructive",
        DestructiveForeground => "destructive-foreground",

        // Borders and focus
        Border => "border",
        Input => "input",
        Ring => "ring",

        // Chart palette
        Chart1 => "chart-1",
        Chart2 => "chart-2",
        Chart3 => "chart-3",
        Chart4 => "chart-4",
        Chart5 => "chart-5",

        // Sidebar
        Sidebar => "sidebar",
        SidebarForeground => "sidebar-foreground",
        SidebarPrimary => "sidebar-primary",
        SidebarPrimaryForeground => "sidebar-primary-foreground",
        SidebarAccent => "sidebar-accent",
        SidebarAccentForeground => "sidebar-accent-foreground",
        SidebarBorder => "sidebar-border",
        SidebarRing => "sidebar-ring",
    }
}

impl ColorToken {
    /// Tokens an imported theme must define in both modes
    pub const REQUIRED: [ColorToken; 4] = [
        ColorToken::Background,
        ColorToken::Foreground,
        ColorToken::Primary,
        ColorToken::PrimaryForeground,
    ];
}
