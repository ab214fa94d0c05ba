//! Raw field → SQL literal coercion.
//!
//! Coercion never fails. Empty fields and numeric fields that do not parse
//! both degrade to [`NULL_LITERAL`]; text is single-quoted with embedded
//! quotes doubled and no other escaping.

use std::borrow::Cow;

use crate::schema::SqlType;

pub const NULL_LITERAL: &str = "NULL";

pub fn coerce_literal(value: Option<&str>, ty: SqlType) -> String {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return NULL_LITERAL.to_string(),
    };
    match ty {
        SqlType::Integer => integer_literal(value).unwrap_or_else(|| NULL_LITERAL.to_string()),
        SqlType::Real => parse_real(value)
            .map(format_real)
            .unwrap_or_else(|| NULL_LITERAL.to_string()),
        SqlType::Text => quote_text(value),
    }
}

/// Parses a signed 64-bit integer, tolerating surrounding whitespace, a
/// leading `+` and `_` separators between digits.
pub fn parse_integer(value: &str) -> Option<i64> {
    let cleaned = strip_digit_separators(value.trim())?;
    cleaned.parse::<i64>().ok()
}

/// Canonical decimal text for an integer field. Values beyond the i64 range
/// keep their digits (sign kept, `+` and leading zeros dropped); SQLite
/// stores those as REAL.
pub fn integer_literal(value: &str) -> Option<String> {
    if let Some(parsed) = parse_integer(value) {
        return Some(parsed.to_string());
    }
    let cleaned = strip_digit_separators(value.trim())?;
    let (negative, digits) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, &cleaned[..]),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    Some(match (negative, significant.is_empty()) {
        (_, true) => "0".to_string(),
        (true, false) => format!("-{significant}"),
        (false, false) => significant.to_string(),
    })
}

/// Parses a finite float. `nan` and infinities are rejected.
pub fn parse_real(value: &str) -> Option<f64> {
    let cleaned = strip_digit_separators(value.trim())?;
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Shortest round-trip form that always reads back as a REAL (`4.0`, not `4`).
pub fn format_real(value: f64) -> String {
    format!("{value:?}")
}

pub fn quote_text(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            quoted.push('\'');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

fn strip_digit_separators(value: &str) -> Option<Cow<'_, str>> {
    if !value.contains('_') {
        return Some(Cow::Borrowed(value));
    }
    let bytes = value.as_bytes();
    let mut cleaned = String::with_capacity(value.len());
    for (idx, ch) in value.char_indices() {
        if ch != '_' {
            cleaned.push(ch);
            continue;
        }
        let before = idx.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(idx + 1).copied();
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(Cow::Owned(cleaned))
}
