//! Unicode glyphs used in display text.

/// Typographic minus sign (U+2212).
pub const MINUS: char = '−';
/// Multiplication dot.
pub const MIDDLE_DOT: char = '·';
pub const INFINITY: char = '∞';
pub const UNION: char = '∪';
pub const EMPTY_SET: char = '∅';

const SUPERSCRIPT_MINUS: char = '⁻';

/// Convert a digit (0-9) to its Unicode superscript equivalent
fn digit_to_superscript(d: u32) -> char {
    match d {
        0 => '⁰',
        1 => '¹',
        2 => '²',
        3 => '³',
        4 => '⁴',
        5 => '⁵',
        6 => '⁶',
        7 => '⁷',
        8 => '⁸',
        9 => '⁹',
        _ => '?',
    }
}

/// Superscript form of a digit string with an optional leading minus.
/// Returns `None` if `digits` is empty or contains a non-digit.
pub(crate) fn superscript_digits(negative: bool, digits: &str) -> Option<String> {
    if digits.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(digits.len() * 3 + 3);
    if negative {
        out.push(SUPERSCRIPT_MINUS);
    }
    for c in digits.chars() {
        out.push(digit_to_superscript(c.to_digit(10)?));
    }
    Some(out)
}

/// Convert an integer to a Unicode superscript string
/// Examples: 2 → "²", 12 → "¹²", -3 → "⁻³"
pub fn superscript(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    superscript_digits(n < 0, &digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superscript_positive_and_negative() {
        assert_eq!(superscript(2), "²");
        assert_eq!(superscript(12), "¹²");
        assert_eq!(superscript(0), "⁰");
        assert_eq!(superscript(-3), "⁻³");
    }

    #[test]
    fn superscript_digits_rejects_non_digits() {
        assert_eq!(superscript_digits(false, "2a"), None);
        assert_eq!(superscript_digits(false, ""), None);
    }
}
