//! Exact number rendering.
//!
//! Machine text is ASCII (`-0.25`, `-3/7`); display text goes through
//! [`format_text`] (`−0,25`, `−3/7`).

use crate::text::format_text;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Canonical machine text: integer `"-3"` or reduced fraction `"11/12"`.
pub fn canonical_rational(value: &BigRational) -> String {
    if value.is_integer() {
        value.to_integer().to_string()
    } else {
        format!("{}/{}", value.numer(), value.denom())
    }
}

/// Terminating decimal expansion in ASCII (`"-0.25"`), or `None` when the
/// reduced denominator has a prime factor other than 2 and 5.
pub fn decimal_expansion(value: &BigRational) -> Option<String> {
    let denom = value.denom().clone();
    let mut rest = denom.clone();
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let (mut twos, mut fives) = (0usize, 0usize);

    while rest.is_even() {
        rest /= &two;
        twos += 1;
    }
    while (&rest % &five).is_zero() {
        rest /= &five;
        fives += 1;
    }
    if !rest.is_one() {
        return None;
    }

    let scale = twos.max(fives);
    let scaled = value.numer() * num_traits::pow(BigInt::from(10), scale) / &denom;
    let sign = if scaled.is_negative() { "-" } else { "" };
    let digits = scaled.abs().to_string();
    if scale == 0 {
        return Some(format!("{}{}", sign, digits));
    }

    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    Some(format!("{}{}.{}", sign, int_part, frac_part))
}

/// Machine text preferring decimal notation: `"0.25"`, else `"1/3"`.
pub fn machine_number(value: &BigRational) -> String {
    decimal_expansion(value).unwrap_or_else(|| canonical_rational(value))
}

/// Display text: `"0,25"`, `"−3"`, `"−1/3"`.
pub fn format_rational(value: &BigRational) -> String {
    format_text(&machine_number(value))
}

/// Parse machine or display text into an exact rational.
///
/// Accepts `-3`, `−3`, `0.25`, `0,25`, `11/12`, `1.5/2`. Returns `None` for
/// anything else, including a zero denominator.
pub fn parse_rational(text: &str) -> Option<BigRational> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '−' => '-',
            ',' => '.',
            other => other,
        })
        .collect();

    if let Some((numer, denom)) = normalized.split_once('/') {
        let numer = parse_decimal(numer)?;
        let denom = parse_decimal(denom)?;
        if denom.is_zero() {
            return None;
        }
        return Some(numer / denom);
    }
    parse_decimal(&normalized)
}

fn parse_decimal(text: &str) -> Option<BigRational> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let numer: BigInt = format!("{}{}", int_part, frac_part).parse().ok()?;
    let denom = num_traits::pow(BigInt::from(10), frac_part.len());
    let value = BigRational::new(numer, denom);
    Some(if negative { -value } else { value })
}
