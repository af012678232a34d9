//! Lenient coercion of raw form input.
//!
//! Form fields arrive as free text. Numbers are read from the longest leading
//! numeric prefix (`"12.5/h"` is `12.5`); anything unreadable or negative
//! becomes zero. These helpers never fail.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Returns the leading `[+-]digits[.digits]` portion of `raw`, normalized so
/// that `Decimal::from_str` accepts it (`".5"` -> `"0.5"`, `"5."` -> `"5"`,
/// `"+5"` -> `"5"`).
fn numeric_prefix(raw: &str, allow_fraction: bool) -> Option<String> {
    let mut out = String::new();
    let mut chars = raw.trim_start().chars().peekable();

    if let Some(&sign) = chars.peek() {
        if sign == '+' || sign == '-' {
            if sign == '-' {
                out.push(sign);
            }
            chars.next();
        }
    }

    let mut int_digits = 0usize;
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        out.push(c);
        int_digits += 1;
        chars.next();
    }

    let mut frac_digits = 0usize;
    if allow_fraction && chars.peek() == Some(&'.') {
        chars.next();
        let mut fraction = String::new();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            fraction.push(c);
            frac_digits += 1;
            chars.next();
        }
        if frac_digits > 0 {
            if int_digits == 0 {
                out.push('0');
            }
            out.push('.');
            out.push_str(&fraction);
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        None
    } else {
        Some(out)
    }
}

/// Parses a non-negative decimal amount, defaulting to zero.
pub fn parse_decimal_lenient(raw: &str) -> Decimal {
    numeric_prefix(raw, true)
        .and_then(|prefix| Decimal::from_str(&prefix).ok())
        .filter(|value| !value.is_sign_negative())
        .map(|value| value.normalize())
        .unwrap_or(Decimal::ZERO)
}

/// Parses a non-negative whole number, defaulting to zero.
/// A fractional part is ignored (`"1.9"` is `1`).
pub fn parse_whole_lenient(raw: &str) -> u64 {
    match numeric_prefix(raw, false) {
        Some(prefix) if !prefix.starts_with('-') => prefix.parse().unwrap_or(0),
        _ => 0,
    }
}
