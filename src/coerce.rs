//! Value coercion: the fixed-precedence normalization that turns a raw field
//! value into its comparison form. Both evaluators funnel through here, so
//! the parse order (number, then boolean, then date, then string) is a
//! contract, not an implementation detail.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::types::Value;

/// The comparison form of a value: one of null, boolean, number or string.
///
/// Equality on `Coerced` is type-aware; a number never equals a string even
/// when they render identically.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
}

impl Coerced {
    /// The numeric reading, if this coerced to a number.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Coerced::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Falsy-guarded string conversion of the comparison form: null, false,
    /// `0`, NaN and the empty string all render as `""`; numbers in shortest
    /// decimal form.
    #[must_use]
    pub fn text_or_empty(&self) -> String {
        match self {
            Coerced::Null | Coerced::Bool(false) => String::new(),
            Coerced::Bool(true) => "true".to_owned(),
            Coerced::Num(n) if *n == 0.0 || n.is_nan() => String::new(),
            Coerced::Num(n) => Value::Num(*n).to_text(),
            Coerced::Str(s) => s.clone(),
        }
    }
}

/// Normalize a raw value for comparison.
///
/// Strings go through, in strict order: partial-prefix numeric parse
/// (accepted only when finite), case-insensitive `"true"`/`"false"`,
/// ISO-8601 date (returned as epoch milliseconds), and finally the string
/// itself unchanged. The order guarantees `"0"` never becomes a date and
/// `"true"` never becomes a number. One carve-out: a string that parses as
/// a complete ISO-8601 date takes its epoch value rather than its year,
/// even though the year is a valid numeric prefix. Lists coerce to their
/// comma-joined string form without re-parsing.
#[must_use]
pub fn coerce(raw: &Value) -> Coerced {
    match raw {
        Value::Null => Coerced::Null,
        Value::Bool(b) => Coerced::Bool(*b),
        Value::Num(n) => Coerced::Num(*n),
        Value::Str(s) => coerce_str(s),
        Value::List(_) => Coerced::Str(raw.to_text()),
    }
}

fn coerce_str(s: &str) -> Coerced {
    // A full ISO string carries a numeric prefix (its year), so the date
    // reading must win over the partial parse for exactly those strings.
    // Everything else keeps the documented order: number, boolean, date.
    let date = if looks_like_iso_date(s) {
        parse_iso_millis(s)
    } else {
        None
    };
    if let Some(n) = parse_float_prefix(s) {
        if n.is_finite() && date.is_none() {
            return Coerced::Num(n);
        }
    }
    match s.to_ascii_lowercase().as_str() {
        "true" => return Coerced::Bool(true),
        "false" => return Coerced::Bool(false),
        _ => {}
    }
    if let Some(millis) = date {
        return Coerced::Num(millis);
    }
    Coerced::Str(s.to_owned())
}

// Every accepted date shape starts `YYYY-`; anything else skips the chrono
// attempts entirely.
fn looks_like_iso_date(s: &str) -> bool {
    s.as_bytes().get(4) == Some(&b'-')
}

/// Parse the longest numeric prefix of `s`: leading whitespace skipped,
/// optional sign, then either the literal `Infinity` (exact case) or a
/// decimal with optional fraction and exponent. `"3.14abc"` parses to
/// `3.14`; a string with no numeric prefix parses to nothing.
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let rest = s.trim_start();
    let bytes = rest.as_bytes();
    let mut i = 0;
    let mut sign = 1.0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        if bytes[i] == b'-' {
            sign = -1.0;
        }
        i += 1;
    }
    if rest[i..].starts_with("Infinity") {
        return Some(sign * f64::INFINITY);
    }
    let start = i;
    let int_len = leading_digits(&bytes[i..]);
    i += int_len;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_len = leading_digits(&bytes[i + 1..]);
        if int_len > 0 || frac_len > 0 {
            i += 1 + frac_len;
        }
    }
    if i == start {
        return None;
    }
    // An exponent only counts when digits follow the `e` (and optional sign).
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_len = leading_digits(&bytes[j..]);
        if exp_len > 0 {
            i = j + exp_len;
        }
    }
    rest[start..i].parse::<f64>().ok().map(|n| sign * n)
}

fn leading_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// The three accepted ISO-8601 shapes: RFC 3339 date-times, naive
/// date-times, and bare dates. Naive forms are pinned to UTC so coercion
/// does not depend on the host time zone.
#[allow(clippy::cast_precision_loss)]
fn parse_iso_millis(s: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis() as f64);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(midnight.and_utc().timestamp_millis() as f64);
    }
    None
}
