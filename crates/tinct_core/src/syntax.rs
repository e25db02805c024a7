//! CSS color value syntax
//!
//! Recognizes the color forms a theme token may hold:
//!
//! - Hex: `#rgb`, `#rrggbb`
//! - `rgb()` / `rgba()` with optional alpha (comma or space separated)
//! - `hsl()` / `hsla()` with optional alpha
//! - `oklch(L C H)` where `L` is a percentage or a plain number, optional `/ alpha`
//! - `var(--name)` references
//! - The keywords `transparent` and `currentColor`

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, digit1, multispace0, multispace1, one_of},
    combinator::{all_consuming, map, map_opt, map_res, opt, recognize, value},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use crate::color::{Hsl, Rgb};

type ParseResult<'a, O> = IResult<&'a str, O>;

/// A syntactically valid CSS color value
#[derive(Clone, Debug, PartialEq)]
pub enum CssColor {
    Hex(Rgb),
    Rgb {
        rgb: Rgb,
        alpha: Option<f64>,
    },
    Hsl {
        hsl: Hsl,
        alpha: Option<f64>,
    },
    Oklch {
        lightness: f64,
        lightness_percent: bool,
        chroma: f64,
        hue: f64,
        alpha: Option<f64>,
    },
    /// Custom property reference, name without the leading `--`
    Var(String),
    Transparent,
    CurrentColor,
}

impl CssColor {
    /// Parse a complete color value. Surrounding whitespace is ignored; any
    /// trailing garbage rejects the whole value.
    pub fn parse(input: &str) -> Option<Self> {
        all_consuming(delimited(multispace0, css_color, multispace0))(input)
            .ok()
            .map(|(_, color)| color)
    }

    /// The sRGB value for forms that carry literal RGB channels.
    pub fn rgb(&self) -> Option<Rgb> {
        match self {
            Self::Hex(rgb) | Self::Rgb { rgb, .. } => Some(*rgb),
            _ => None,
        }
    }

    /// Whether the value is an indirection or keyword rather than a concrete color.
    pub fn is_indirect(&self) -> bool {
        matches!(self, Self::Var(_) | Self::Transparent | Self::CurrentColor)
    }
}

fn css_color(input: &str) -> ParseResult<CssColor> {
    alt((
        hex_color,
        rgb_function,
        hsl_function,
        oklch_function,
        var_reference,
        value(CssColor::Transparent, tag_no_case("transparent")),
        value(CssColor::CurrentColor, tag_no_case("currentcolor")),
    ))(input)
}

/// Unsigned or signed decimal without exponent
fn number(input: &str) -> ParseResult<f64> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn percentage(input: &str) -> ParseResult<(f64, bool)> {
    map(pair(number, opt(char('%'))), |(v, pct)| (v, pct.is_some()))(input)
}

fn open_paren(input: &str) -> ParseResult<()> {
    value((), tuple((multispace0, char('('), multispace0)))(input)
}

fn close_paren(input: &str) -> ParseResult<()> {
    value((), pair(multispace0, char(')')))(input)
}

/// Channel separator: a comma with optional whitespace, or plain whitespace
fn separator(input: &str) -> ParseResult<()> {
    alt((
        value((), delimited(multispace0, char(','), multispace0)),
        value((), multispace1),
    ))(input)
}

/// Alpha channel introduced by `,` or `/`; percentages map to `[0, 1]`.
fn alpha(input: &str) -> ParseResult<f64> {
    preceded(
        delimited(multispace0, one_of(",/"), multispace0),
        map(percentage, |(v, pct)| if pct { v / 100.0 } else { v }),
    )(input)
}

fn hex_color(input: &str) -> ParseResult<CssColor> {
    map_opt(
        preceded(char('#'), take_while1(|c: char| c.is_ascii_hexdigit())),
        |digits: &str| Rgb::from_hex(digits).map(CssColor::Hex),
    )(input)
}

fn rgb_channel(input: &str) -> ParseResult<f64> {
    map(percentage, |(v, pct)| if pct { v * 255.0 / 100.0 } else { v })(input)
}

fn rgb_function(input: &str) -> ParseResult<CssColor> {
    let (input, _) = alt((tag_no_case("rgba"), tag_no_case("rgb")))(input)?;
    let (input, _) = open_paren(input)?;
    let (input, r) = rgb_channel(input)?;
    let (input, _) = separator(input)?;
    let (input, g) = rgb_channel(input)?;
    let (input, _) = separator(input)?;
    let (input, b) = rgb_channel(input)?;
    let (input, alpha) = opt(alpha)(input)?;
    let (input, _) = close_paren(input)?;

    Ok((
        input,
        CssColor::Rgb {
            rgb: Rgb::from_channels(r, g, b),
            alpha,
        },
    ))
}

fn hue(input: &str) -> ParseResult<f64> {
    let (input, h) = number(input)?;
    let (input, _) = opt(tag_no_case("deg"))(input)?;
    Ok((input, h))
}

fn hsl_function(input: &str) -> ParseResult<CssColor> {
    let (input, _) = alt((tag_no_case("hsla"), tag_no_case("hsl")))(input)?;
    let (input, _) = open_paren(input)?;
    let (input, h) = hue(input)?;
    let (input, _) = separator(input)?;
    let (input, (s, _)) = percentage(input)?;
    let (input, _) = separator(input)?;
    let (input, (l, _)) = percentage(input)?;
    let (input, alpha) = opt(alpha)(input)?;
    let (input, _) = close_paren(input)?;

    Ok((
        input,
        CssColor::Hsl {
            hsl: Hsl::new(h, s, l),
            alpha,
        },
    ))
}

fn oklch_function(input: &str) -> ParseResult<CssColor> {
    let (input, _) = tag_no_case("oklch")(input)?;
    let (input, _) = open_paren(input)?;
    let (input, (lightness, lightness_percent)) = percentage(input)?;
    let (input, _) = separator(input)?;
    let (input, chroma) = number(input)?;
    let (input, _) = separator(input)?;
    let (input, hue) = hue(input)?;
    let (input, alpha) = opt(alpha)(input)?;
    let (input, _) = close_paren(input)?;

    Ok((
        input,
        CssColor::Oklch {
            lightness,
            lightness_percent,
            chroma,
            hue,
            alpha,
        },
    ))
}

fn var_reference(input: &str) -> ParseResult<CssColor> {
    let (input, _) = tag("var")(input)?;
    let (input, _) = open_paren(input)?;
    let (input, _) = tag("--")(input)?;
    let (input, name) = take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)?;
    let (input, _) = close_paren(input)?;
    Ok((input, CssColor::Var(name.to_string())))
}
