//! Decimal reading and rounding for numeric expectations.
//!
//! Values are held as `BigDecimal` so that equality is exact: `3.1` and
//! `3.10001` differ, while `3`, `03` and `3.0` are the same number.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};

use crate::patterns::is_number;

/// Parse text as a decimal number.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is not
/// a plain decimal literal (exponents, `NaN`, `inf`, empty text).
pub fn parse_number(text: &str) -> Option<BigDecimal> {
    let trimmed = text.trim();
    if !is_number(trimmed) {
        return None;
    }

    let (sign, body) = match trimmed.as_bytes()[0] {
        b'-' => ("-", &trimmed[1..]),
        b'+' => ("", &trimmed[1..]),
        _ => ("", trimmed),
    };

    let mut normalized = String::with_capacity(body.len() + 2);
    normalized.push_str(sign);
    if body.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(body);
    if body.ends_with('.') {
        normalized.push('0');
    }

    BigDecimal::from_str(&normalized).ok()
}

/// Number of digits after the decimal point, as written.
pub fn decimal_places(literal: &str) -> u32 {
    match literal.trim().split_once('.') {
        Some((_, fraction)) => fraction.len() as u32,
        None => 0,
    }
}

/// Round to `places` decimal digits, ties away from zero.
pub fn round_half_up(value: &BigDecimal, places: u32) -> BigDecimal {
    value.with_scale_round(i64::from(places), RoundingMode::HalfUp)
}
