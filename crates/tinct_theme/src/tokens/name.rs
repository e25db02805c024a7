//! Token names

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ColorToken, DerivedToken, StyleToken};

/// Any token a theme map may carry
///
/// Known tokens parse into their typed variant; everything else is kept
/// verbatim as [`TokenName::Extra`] so artifacts can carry tokens outside
/// the known set.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum TokenName {
    Color(ColorToken),
    Style(StyleToken),
    Derived(DerivedToken),
    Extra(String),
}

impl TokenName {
    /// Parse a token name; a leading `--` and surrounding whitespace are ignored.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        let name = name.strip_prefix("--").unwrap_or(name);

        if let Some(token) = ColorToken::from_name(name) {
            Self::Color(token)
        } else if let Some(token) = StyleToken::from_name(name) {
            Self::Style(token)
        } else if let Some(token) = DerivedToken::from_name(name) {
            Self::Derived(token)
        } else {
            Self::Extra(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Color(token) => token.name(),
            Self::Style(token) => token.name(),
            Self::Derived(token) => token.name(),
            Self::Extra(name) => name,
        }
    }

    pub fn color(&self) -> Option<ColorToken> {
        match self {
            Self::Color(token) => Some(*token),
            _ => None,
        }
    }

    pub fn style(&self) -> Option<StyleToken> {
        match self {
            Self::Style(token) => Some(*token),
            _ => None,
        }
    }

    /// CSS custom property name, e.g. `--primary`
    pub fn property(&self) -> String {
        format!("--{}", self.as_str())
    }
}

impl FromStr for TokenName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ColorToken> for TokenName {
    fn from(token: ColorToken) -> Self {
        Self::Color(token)
    }
}

impl From<StyleToken> for TokenName {
    fn from(token: StyleToken) -> Self {
        Self::Style(token)
    }
}

impl From<DerivedToken> for TokenName {
    fn from(token: DerivedToken) -> Self {
        Self::Derived(token)
    }
}

impl From<&str> for TokenName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<&TokenName> for TokenName {
    fn from(name: &TokenName) -> Self {
        name.clone()
    }
}

impl Serialize for TokenName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TokenName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}
