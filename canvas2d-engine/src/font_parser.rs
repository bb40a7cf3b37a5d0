//! CSS font shorthand parsing for the `font` property.
//!
//! Parses strings like "12px Arial" or "bold italic 14pt 'Times New Roman'"
//! into a backend-neutral [`ParsedFont`].

use crate::error::{Canvas2dError, Canvas2dResult};

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Parsed font specification from a CSS font string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFont {
    pub style: FontStyle,
    /// Numeric weight, 100 to 900.
    pub weight: u16,
    pub small_caps: bool,
    /// Font size in pixels.
    pub size_px: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for ParsedFont {
    fn default() -> Self {
        Self {
            style: FontStyle::Normal,
            weight: 400,
            small_caps: false,
            size_px: 10.0,
            families: vec!["sans-serif".to_string()],
        }
    }
}

impl ParsedFont {
    /// Serialize back to a CSS font string, as returned by the `font` getter.
    pub fn to_css(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        match self.style {
            FontStyle::Normal => {}
            FontStyle::Italic => parts.push("italic".into()),
            FontStyle::Oblique => parts.push("oblique".into()),
        }
        if self.small_caps {
            parts.push("small-caps".into());
        }
        match self.weight {
            400 => {}
            700 => parts.push("bold".into()),
            w => parts.push(w.to_string()),
        }
        parts.push(format!("{}px", self.size_px));
        let families: Vec<String> = self
            .families
            .iter()
            .map(|f| {
                if f.contains(char::is_whitespace) {
                    format!("\"{}\"", f)
                } else {
                    f.clone()
                }
            })
            .collect();
        parts.push(families.join(", "));
        parts.join(" ")
    }
}

/// True when `rest` ends a keyword: end of input or whitespace.
fn at_word_end(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(char::is_whitespace)
}

/// Parse a CSS font string into components.
///
/// Supports format: `[style] [variant] [weight] size[/line-height] family[, family]*`
pub fn parse_font(font_str: &str) -> Canvas2dResult<ParsedFont> {
    let font_str = font_str.trim();
    if font_str.is_empty() {
        return Err(Canvas2dError::FontParseError("empty font string".into()));
    }

    let mut result = ParsedFont::default();
    let mut remaining = font_str;

    // Style, variant and weight in any order.
    loop {
        let trimmed = remaining.trim_start();
        let keyword = [
            "italic",
            "oblique",
            "normal",
            "small-caps",
            "bolder",
            "bold",
            "lighter",
        ]
        .into_iter()
        .find(|kw| trimmed.strip_prefix(kw).is_some_and(at_word_end));

        if let Some(kw) = keyword {
            match kw {
                "italic" => result.style = FontStyle::Italic,
                "oblique" => result.style = FontStyle::Oblique,
                "small-caps" => result.small_caps = true,
                "bold" => result.weight = 700,
                "bolder" => result.weight = 800,
                "lighter" => result.weight = 300,
                _ => {}
            }
            remaining = &trimmed[kw.len()..];
            continue;
        }

        if let Some((weight, rest)) = parse_numeric_weight(trimmed) {
            result.weight = weight;
            remaining = rest;
            continue;
        }
        break;
    }

    remaining = remaining.trim_start();
    let (size, rest) = parse_font_size(remaining)?;
    result.size_px = size;
    remaining = rest;

    remaining = remaining.trim_start();
    if let Some(rest) = remaining.strip_prefix('/') {
        remaining = skip_line_height(rest);
    }

    // A family list is required.
    let families = parse_font_families(remaining.trim_start());
    if families.is_empty() {
        return Err(Canvas2dError::FontParseError(format!(
            "Missing font family in '{}'",
            font_str
        )));
    }
    result.families = families;

    Ok(result)
}

/// Try to parse a numeric weight (100-900) at the start of the string.
fn parse_numeric_weight(s: &str) -> Option<(u16, &str)> {
    let digits_len = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    let rest = &s[digits_len..];
    if !at_word_end(rest) {
        return None;
    }
    let weight: u16 = s[..digits_len].parse().ok()?;
    ((1..=1000).contains(&weight)).then_some((weight, rest))
}

/// Parse a font size with its unit, converted to pixels.
fn parse_font_size(s: &str) -> Canvas2dResult<(f32, &str)> {
    let num_end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    if num_end == 0 {
        return Err(Canvas2dError::FontParseError(format!(
            "Expected font size, got: {}",
            s
        )));
    }

    let num_str = &s[..num_end];
    let rest = &s[num_end..];

    let size: f32 = num_str.parse().map_err(|_| {
        Canvas2dError::FontParseError(format!("Invalid font size number: {}", num_str))
    })?;

    let (multiplier, unit_len) = if rest.starts_with("px") {
        (1.0, 2)
    } else if rest.starts_with("pt") {
        (4.0 / 3.0, 2)
    } else if rest.starts_with("rem") {
        (16.0, 3)
    } else if rest.starts_with("em") {
        (16.0, 2)
    } else if rest.starts_with('%') {
        (16.0 / 100.0, 1)
    } else {
        return Err(Canvas2dError::FontParseError(format!(
            "Font size needs a unit: {}",
            s
        )));
    };

    Ok((size * multiplier, &rest[unit_len..]))
}

/// Skip a line-height after '/'.
fn skip_line_height(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[end..]
}

fn parse_font_families(s: &str) -> Vec<String> {
    let mut families = Vec::new();
    let mut remaining = s.trim();

    while !remaining.is_empty() {
        let (family, rest) = parse_single_family(remaining);
        if !family.is_empty() {
            families.push(family);
        }
        remaining = rest.trim_start();
        match remaining.strip_prefix(',') {
            Some(rest) => remaining = rest.trim_start(),
            None => break,
        }
    }
    families
}

fn parse_single_family(s: &str) -> (String, &str) {
    let s = s.trim_start();

    if let Some(quote) = s.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let body = &s[1..];
        return match body.find(quote) {
            Some(end) => (body[..end].to_string(), &body[end + 1..]),
            None => (body.to_string(), ""),
        };
    }

    let end = s.find(',').unwrap_or(s.len());
    (s[..end].trim().to_string(), &s[end..])
}
