//! CSS theme import and export
//!
//! Reads custom properties from a `:root { ... }` block (light) and a
//! `.dark { ... }` block (dark):
//!
//! ```css
//! @layer base {
//!   :root {
//!     --background: #ffffff;
//!     --font-sans: "Inter", sans-serif;
//!   }
//!   .dark {
//!     --background: #0a0a0a;
//!   }
//! }
//! ```
//!
//! Values are scanned up to the next `;` or `}` outside parentheses and
//! quotes, so `url("a;b")` and `var(--x, rgb(0 0 0))` survive intact.
//! `@layer` blocks are descended into; every other rule is skipped.

use std::fmt::Write as _;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, multispace1},
    combinator::{all_consuming, cut, map, opt, value},
    error::{context, ErrorKind, ParseError as NomParseError, VerboseError, VerboseErrorKind},
    multi::many0,
    sequence::{delimited, preceded},
    IResult,
};

use crate::error::ImportError;
use crate::theme::{ImportedTheme, ResolvedTheme};
use crate::tokens::{TokenMap, TokenName};
use crate::validate::validate_imported_theme;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Selectors whose declarations carry the theme
const LIGHT_SELECTOR: &str = ":root";
const DARK_SELECTOR: &str = ".dark";

/// A rule block the importer cares about
#[derive(Debug)]
struct ThemeRule<'a> {
    selector: &'a str,
    declarations: Vec<(&'a str, String)>,
}

/// Parse CSS text into an imported theme.
///
/// Both blocks must be present and each must pass the imported theme
/// structural check on its own. After that `.dark` inherits every `:root`
/// property it does not set. Nothing is returned on failure.
pub fn parse_css_theme(css: &str) -> Result<ImportedTheme, ImportError> {
    let rules = match all_consuming(stylesheet)(css) {
        Ok((_, rules)) => rules,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(syntax_error(css, &e));
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(ImportError::CssSyntax {
                line: css.lines().count().max(1),
                message: "unexpected end of input".to_string(),
            });
        }
    };

    let mut light: Option<TokenMap> = None;
    let mut dark: Option<TokenMap> = None;

    for rule in rules {
        for selector in rule.selector.split(',').map(str::trim) {
            let target = match selector {
                LIGHT_SELECTOR => &mut light,
                DARK_SELECTOR => &mut dark,
                _ => continue,
            };
            let tokens = target.get_or_insert_with(TokenMap::new);
            for (name, value) in &rule.declarations {
                if let Some(token) = name.strip_prefix("--") {
                    tokens.insert(token, value.as_str());
                }
            }
        }
    }

    let light = light.ok_or(ImportError::MissingBlock(LIGHT_SELECTOR))?;
    let dark = dark.ok_or(ImportError::MissingBlock(DARK_SELECTOR))?;
    tracing::debug!(
        light = light.len(),
        dark = dark.len(),
        "parsed CSS theme declarations"
    );

    let mut theme = ImportedTheme::new(light, dark);
    validate_imported_theme(&serde_json::to_value(&theme)?)?;

    // `.dark` sits under `:root` in the cascade
    theme.dark.merge_missing(&theme.light);
    Ok(theme)
}

/// Render resolved maps as importable CSS.
///
/// `:root` carries the full light map; `.dark` carries the dark colors and
/// any other dark entry that differs from light.
pub fn export_css(theme: &ResolvedTheme) -> String {
    let mut css = String::new();

    css.push_str(":root {\n");
    for (name, value) in theme.light.iter() {
        write_declaration(&mut css, name, value);
    }
    css.push_str("}\n\n");

    css.push_str(".dark {\n");
    for (name, value) in theme.dark.iter() {
        if name.color().is_some() || theme.light.get(name) != Some(value) {
            write_declaration(&mut css, name, value);
        }
    }
    css.push_str("}\n");

    css
}

fn write_declaration(css: &mut String, name: &TokenName, value: &str) {
    // writing into a String never fails
    let _ = writeln!(css, "  {}: {};", name.property(), value);
}

fn syntax_error(css: &str, err: &VerboseError<&str>) -> ImportError {
    let fragment = err.errors.first().map(|(input, _)| *input).unwrap_or(css);
    let offset = css.len().saturating_sub(fragment.len());
    let line = css[..offset].matches('\n').count() + 1;

    ImportError::CssSyntax {
        line,
        message: format_verbose_error(err),
    }
}

/// Format a VerboseError into a human-readable message
fn format_verbose_error(err: &VerboseError<&str>) -> String {
    let mut parts = Vec::new();

    for (input, kind) in &err.errors {
        match kind {
            VerboseErrorKind::Context(ctx) => {
                parts.push(format!("in {}", ctx));
            }
            VerboseErrorKind::Char(c) => {
                let preview: String = input.chars().take(20).collect();
                parts.push(format!("expected '{}' near \"{}\"", c, preview));
            }
            VerboseErrorKind::Nom(ek) => {
                parts.push(format!("{:?}", ek));
            }
        }
    }

    if parts.is_empty() {
        "unknown parse error".to_string()
    } else {
        parts.join(", ")
    }
}

/// Parse whitespace and comments
fn ws<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value(
        (),
        many0(alt((value((), multispace1), value((), parse_comment)))),
    )(input)
}

/// Parse a block comment /* ... */
fn parse_comment<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    delimited(tag("/*"), take_until("*/"), tag("*/"))(input)
}

/// Parse an identifier (alphanumeric, hyphen, underscore)
fn identifier<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn stylesheet(input: &str) -> ParseResult<Vec<ThemeRule<'_>>> {
    let (input, rules) = many0(preceded(ws, rule))(input)?;
    let (input, _) = ws(input)?;
    Ok((input, rules.into_iter().flatten().collect()))
}

fn rule(input: &str) -> ParseResult<Vec<ThemeRule<'_>>> {
    alt((at_rule, style_rule))(input)
}

/// `@layer` blocks are descended into; statements end at `;`; other
/// at-rule blocks are skipped.
fn at_rule(input: &str) -> ParseResult<Vec<ThemeRule<'_>>> {
    let (input, _) = char('@')(input)?;
    let (input, name) = cut(context("at-rule name", identifier))(input)?;
    let (input, _) = take_while(|c: char| c != '{' && c != ';' && c != '}')(input)?;

    if let Ok((input, _)) = char::<_, VerboseError<&str>>(';')(input) {
        return Ok((input, Vec::new()));
    }

    if name.eq_ignore_ascii_case("layer") {
        cut(context(
            "@layer block",
            delimited(char('{'), stylesheet, preceded(ws, char('}'))),
        ))(input)
    } else {
        let (input, _) = cut(context("at-rule block", skip_block))(input)?;
        Ok((input, Vec::new()))
    }
}

fn style_rule(input: &str) -> ParseResult<Vec<ThemeRule<'_>>> {
    let (input, selector) = context(
        "selector",
        take_while1(|c: char| c != '{' && c != '}' && c != ';'),
    )(input)?;
    let selector = selector.trim();

    let wanted = selector
        .split(',')
        .map(str::trim)
        .any(|s| s == LIGHT_SELECTOR || s == DARK_SELECTOR);

    if wanted {
        let (input, declarations) = cut(declaration_block)(input)?;
        Ok((
            input,
            vec![ThemeRule {
                selector,
                declarations,
            }],
        ))
    } else {
        tracing::trace!("skipping CSS rule {:?}", selector);
        let (input, _) = cut(context("rule block", skip_block))(input)?;
        Ok((input, Vec::new()))
    }
}

/// Parse a rule block: { property: value; ... }
fn declaration_block(input: &str) -> ParseResult<Vec<(&str, String)>> {
    let (input, _) = context("opening brace", char('{'))(input)?;
    let (input, declarations) = many0(alt((
        map(declaration, Some),
        value(None, preceded(ws, char(';'))),
    )))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("closing brace", char('}'))(input)?;
    Ok((input, declarations.into_iter().flatten().collect()))
}

/// Parse a single property declaration: name: value;
fn declaration(input: &str) -> ParseResult<(&str, String)> {
    let (input, _) = ws(input)?;
    let (input, name) = context("property name", identifier)(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("colon after property name", char(':'))(input)?;
    let (input, _) = ws(input)?;
    let (input, value) = context("property value", property_value)(input)?;
    let (input, _) = opt(char(';'))(input)?;
    Ok((input, (name, value)))
}

/// Scan a value up to `;` or `}` at nesting depth zero. Comments outside
/// quotes are dropped.
fn property_value(input: &str) -> ParseResult<String> {
    let mut out = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                let rest = &input[i + 2..];
                let Some(close) = rest.find("*/") else {
                    return Err(nom::Err::Failure(VerboseError::from_error_kind(
                        &input[i..],
                        ErrorKind::TakeUntil,
                    )));
                };
                let resume = i + 2 + close + 2;
                while matches!(chars.peek(), Some((j, _)) if *j < resume) {
                    chars.next();
                }
            }
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            '(' => {
                depth += 1;
                out.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                out.push(c);
            }
            ';' | '}' if depth == 0 => {
                return Ok((&input[i..], out.trim().to_string()));
            }
            '{' if depth == 0 => {
                return Err(nom::Err::Error(VerboseError::from_error_kind(
                    &input[i..],
                    ErrorKind::Char,
                )));
            }
            _ => out.push(c),
        }
    }

    Err(nom::Err::Error(VerboseError::from_error_kind(
        &input[input.len()..],
        ErrorKind::Eof,
    )))
}

/// Skip a `{ ... }` block, balancing braces outside quotes and comments.
fn skip_block(input: &str) -> ParseResult<()> {
    let (body, _) = char('{')(input)?;
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut in_comment = false;
    let mut prev = '\0';

    for (i, c) in body.char_indices() {
        if in_comment {
            if prev == '*' && c == '/' {
                in_comment = false;
                prev = '\0';
                continue;
            }
        } else if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
        } else {
            match c {
                '*' if prev == '/' => in_comment = true,
                '"' | '\'' => quote = Some(c),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok((&body[i + 1..], ()));
                    }
                }
                _ => {}
            }
        }
        prev = c;
    }

    Err(nom::Err::Error(VerboseError::from_error_kind(
        &body[body.len()..],
        ErrorKind::Eof,
    )))
}
