//! SKU and slug derivation for catalog products.

use std::fmt::Write as _;

/// Segment written for a token that has nothing left after normalization.
const EMPTY_TOKEN_SEGMENT: &str = "_";

/// Derive a stock-keeping unit code from a product slug and the value tokens
/// of one variant combination.
///
/// The slug and each token become one segment, joined with `-`. Inside a
/// segment letters and digits are kept (uppercased), every run of whitespace
/// or ASCII punctuation collapses to a single `_`, and any other character
/// (symbols, emoji) is written as its code point, e.g. `[U+1F339]`. The
/// result never contains whitespace.
///
/// Every token keeps its own segment, even one that normalizes to nothing
/// (written as `_`). Two token lists for the same slug therefore give
/// different codes unless they differ only in letter case or in the
/// whitespace and ASCII punctuation between letters and digits. The code is
/// only a pre-filled default; operators may edit it.
#[must_use]
pub fn generate_sku(product_slug: &str, attribute_tokens: &[String]) -> String {
    let mut segments = Vec::with_capacity(attribute_tokens.len() + 1);

    let prefix = sku_segment(product_slug);
    if !prefix.is_empty() {
        segments.push(prefix);
    }
    for token in attribute_tokens {
        let segment = sku_segment(token);
        if segment.is_empty() {
            segments.push(EMPTY_TOKEN_SEGMENT.to_string());
        } else {
            segments.push(segment);
        }
    }

    segments.join("-")
}

fn sku_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.chars() {
        if c.is_whitespace() || c.is_ascii_punctuation() {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('_');
        }
        pending_separator = false;
        if c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            let _ = write!(out, "[U+{:X}]", u32::from(c));
        }
    }
    out
}

/// Generate a URL-safe slug from a display name.
///
/// ASCII letters and digits are kept lowercase; spaces, underscores and
/// dashes become single dashes; everything else is dropped.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c.is_whitespace() || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
