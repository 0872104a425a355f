//! Lenient text-to-number coercion for free-form form fields.
//!
//! The calculation core only ever sees [`Decimal`] values; this module is the
//! boundary where user text is turned into numbers. It never fails: anything
//! that does not read as a number becomes zero.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]+").expect("valid strip pattern"));

static NUMBER_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid number pattern"));

/// Coerces free-form text into a number.
///
/// Every character other than ASCII digits, `.` and `-` is removed first.
/// What remains is read as an optionally negative decimal number. Empty text
/// is zero; text that still is not a number (`"-"`, `"1.2.3"`, `"5-"`) is zero.
/// A number too large to represent saturates to [`Decimal::MAX`] (or
/// [`Decimal::MIN`] when negative).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use progtax_core::parse_lenient_number;
///
/// assert_eq!(parse_lenient_number("5000"), dec!(5000));
/// assert_eq!(parse_lenient_number("$ 4,500.50"), dec!(4500.50));
/// assert_eq!(parse_lenient_number("abc"), dec!(0));
/// assert_eq!(parse_lenient_number("1.2.3"), dec!(0));
/// ```
pub fn parse_lenient_number(text: &str) -> Decimal {
    let stripped = DISALLOWED.replace_all(text, "");
    if stripped.is_empty() {
        return Decimal::ZERO;
    }

    if !NUMBER_SHAPE.is_match(&stripped) {
        tracing::debug!(input = %text, stripped = %stripped, "not a number; using 0");
        return Decimal::ZERO;
    }

    Decimal::from_str(&normalize(&stripped)).unwrap_or_else(|e| {
        let saturated = if stripped.starts_with('-') {
            Decimal::MIN
        } else {
            Decimal::MAX
        };
        tracing::debug!(input = %text, "number out of range ({}); saturating to {}", e, saturated);
        saturated
    })
}

/// Rewrites the bare forms `.5`, `-.5` and `5.` into `0.5`, `-0.5` and `5`.
fn normalize(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);
    if digits.starts_with('.') {
        format!("{sign}0{digits}")
    } else {
        format!("{sign}{digits}")
    }
}
