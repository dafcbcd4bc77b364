//! # Org Config Parsing
//!
//! Reads `truePercentage` out of an org's integration settings.
//!
//! The host stores whatever the admin typed into the settings form, so the
//! value may be a number, a numeric string, or garbage. Parsing never fails:
//! anything that does not coerce to a finite number yields
//! [`DEFAULT_TRUE_PERCENTAGE`], and finite values are clamped to `[0, 100]`.
//!
//! Coercion follows the host's loose number semantics: non-numbers are
//! stringified, trimmed and parsed, and a blank string counts as `0`.

use crate::primitives::{
    DEFAULT_TRUE_PERCENTAGE, MAX_TRUE_PERCENTAGE, MIN_TRUE_PERCENTAGE, TRUE_PERCENTAGE_KEY,
};
use crate::types::OrgConfig;
use serde_json::Value;

/// Parse `truePercentage` from an org config into `[0, 100]`.
///
/// Returns 50 when the key is absent, null, or not a finite number.
pub fn parse_true_percentage(config: &OrgConfig) -> f64 {
    let Some(value) = config.get(TRUE_PERCENTAGE_KEY) else {
        return DEFAULT_TRUE_PERCENTAGE;
    };

    let number = match value {
        Value::Null => return DEFAULT_TRUE_PERCENTAGE,
        Value::Number(n) => n.as_f64(),
        other => parse_loose_number(trim_loose(&loose_string(other))),
    };

    match number {
        Some(n) if n.is_finite() => n.clamp(MIN_TRUE_PERCENTAGE, MAX_TRUE_PERCENTAGE),
        _ => DEFAULT_TRUE_PERCENTAGE,
    }
}

/// Whether the org has explicitly set a non-blank `truePercentage`.
pub fn has_true_percentage_config(config: Option<&OrgConfig>) -> bool {
    let Some(value) = config.and_then(|c| c.get(TRUE_PERCENTAGE_KEY)) else {
        return false;
    };
    !value.is_null() && !trim_loose(&loose_string(value)).is_empty()
}

/// String form of a config value.
///
/// Arrays join their elements with commas, rendering null elements as empty;
/// objects have no numeric form and render as an opaque tag.
fn loose_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => loose_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Strip the whitespace the host trims: Unicode white space and the byte
/// order mark, but not U+0085.
fn trim_loose(s: &str) -> &str {
    s.trim_matches(|c: char| (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}')
}

/// Parse an already-trimmed string as a number.
///
/// Accepts decimal literals and unsigned `0x`/`0o`/`0b` integer literals
/// of any length.
/// A blank string is `0`. Returns `None` for anything else.
fn parse_loose_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }

    let radix_literal = s.get(..2).and_then(|prefix| match prefix {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    });
    if let Some(radix) = radix_literal {
        return parse_radix_digits(&s[2..], radix);
    }

    // Rust's float grammar also admits "inf"/"nan" spellings; those are
    // non-finite and end up at the default either way.
    s.parse::<f64>().ok()
}

/// Accumulate unsigned digits in `radix`.
///
/// Signs and empty digit strings are rejected. Values past 2^53 lose
/// precision instead of failing; they clamp to the upper bound anyway.
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

// =============================================================================
// TESTS
// =============================================================================
