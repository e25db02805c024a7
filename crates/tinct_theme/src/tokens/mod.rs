//! Design tokens for theming
//!
//! Tokens are the named values a theme assigns:
//! - Colors, with independent light and dark values ([`ColorToken`])
//! - Mode-independent styles: radius, spacing, shadow parts, HSL adjustment
//!   inputs, typography ([`StyleToken`])
//! - Derived shadows computed from the shadow parts ([`DerivedToken`])
//!
//! Anything else an imported theme carries is kept as [`TokenName::Extra`].

/// Declares a closed token enum together with its CSS names.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $css:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every token of this kind, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// CSS custom property name without the `--` prefix
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $css, )+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $css => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

mod color;
mod map;
mod name;
mod shadow;
mod style;

pub use color::*;
pub use map::*;
pub use name::*;
pub use shadow::*;
pub use style::*;
