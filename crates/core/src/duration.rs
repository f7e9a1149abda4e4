//! Parser for duration expressions such as `"1h30m"`, `"-1.5h"` or `"250ms"`.
//!
//! An expression is an optional sign followed by one or more
//! `<decimal number><unit>` terms. Recognised units are `ns`, `us`, `µs`,
//! `μs`, `ms`, `s`, `m` and `h`. The bare literal `"0"` is also accepted.
//! Totals are held as signed 64-bit nanoseconds.

use chrono::Duration;
use thiserror::Error;

const LIMIT: u64 = 1 << 63;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "\u{00b5}s" | "\u{03bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 60 * 60 * 1_000_000_000,
        _ => return None,
    };
    Some(nanos)
}

/// Consumes leading ASCII digits as an integer. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
            .filter(|v| *v <= LIMIT)?;
    }
    Some((value, &s[end..]))
}

/// Consumes leading ASCII digits as a fraction, returning the digits as an
/// integer and the power of ten they are scaled by. Digits past the point of
/// overflow are consumed but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflowed = false;
    for digit in s[..end].bytes() {
        if overflowed {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
            .filter(|v| *v <= LIMIT)
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => overflowed = true,
        }
    }
    (value, scale, &s[end..])
}

pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid(input.to_string());
    let overflow = || ParseDurationError::Overflow(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let before = rest.len();
        let (whole, after_int) = leading_int(rest).ok_or_else(invalid)?;
        let has_whole = after_int.len() != before;
        rest = after_int;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (f, s, remaining) = leading_fraction(after_dot);
            has_fraction = remaining.len() != after_dot.len();
            fraction = f;
            scale = s;
            rest = remaining;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit(input.to_string()));
        }
        let (unit, remaining) = rest.split_at(unit_len);
        rest = remaining;
        let unit = unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        if whole > LIMIT / unit {
            return Err(overflow());
        }
        let mut term = whole * unit;
        if fraction > 0 {
            term += (fraction as f64 * (unit as f64 / scale)) as u64;
            if term > LIMIT {
                return Err(overflow());
            }
        }
        total = total.checked_add(term).filter(|t| *t <= LIMIT).ok_or_else(overflow)?;
    }

    let nanos = if negative {
        if total == LIMIT {
            i64::MIN
        } else {
            -(total as i64)
        }
    } else {
        i64::try_from(total).map_err(|_| overflow())?
    };
    Ok(Duration::nanoseconds(nanos))
}
