//! Idempotent display normaliser for machine text.
//!
//! Rules, applied in a single left-to-right pass:
//! - `*` becomes `·`
//! - `-` becomes `−` unless it joins two Cyrillic letters (a hyphen in a word)
//! - a `.` between digits becomes `,`; trailing fractional zeros are dropped
//!   (`4.0` → `4`, `2.50` → `2,5`)
//! - `^` followed by an integer (optionally signed, optionally parenthesised)
//!   becomes superscript glyphs (`x^2` → `x²`, `10^(-3)` → `10⁻³`)
//!
//! None of the rule outputs contain a rule trigger, so formatting an already
//! formatted string returns it unchanged.

use crate::glyphs::{superscript_digits, MIDDLE_DOT, MINUS};

pub fn format_text(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' => {
                out.push(MIDDLE_DOT);
                i += 1;
            }
            '-' => {
                if joins_word(&chars, i) {
                    out.push('-');
                } else {
                    out.push(MINUS);
                }
                i += 1;
            }
            '.' if is_decimal_point(&chars, i) => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].is_ascii_digit() {
                    end += 1;
                }
                let fraction: String = chars[start..end].iter().collect();
                let trimmed = fraction.trim_end_matches('0');
                if !trimmed.is_empty() {
                    out.push(',');
                    out.push_str(trimmed);
                }
                i = end;
            }
            '^' => match parse_exponent(&chars, i + 1) {
                Some((glyphs, consumed)) => {
                    out.push_str(&glyphs);
                    i += 1 + consumed;
                }
                None => {
                    out.push('^');
                    i += 1;
                }
            },
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

fn joins_word(chars: &[char], i: usize) -> bool {
    let prev = i.checked_sub(1).and_then(|p| chars.get(p));
    let next = chars.get(i + 1);
    matches!((prev, next), (Some(p), Some(n)) if is_cyrillic(*p) && is_cyrillic(*n))
}

fn is_decimal_point(chars: &[char], i: usize) -> bool {
    let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
    let next_digit = chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());
    prev_digit && next_digit
}

/// Parse `N`, `-N`, `−N`, `+N`, `(N)`, `(-N)` starting at `start`.
/// Returns the superscript text and the number of chars consumed.
fn parse_exponent(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut j = start;
    let parenthesised = chars.get(j) == Some(&'(');
    if parenthesised {
        j += 1;
    }

    let mut negative = false;
    match chars.get(j) {
        Some('-') | Some(&MINUS) => {
            negative = true;
            j += 1;
        }
        Some('+') => j += 1,
        _ => {}
    }

    let digits_start = j;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    let digits: String = chars[digits_start..j].iter().collect();

    if parenthesised {
        if chars.get(j) != Some(&')') {
            return None;
        }
        j += 1;
    }

    let glyphs = superscript_digits(negative, &digits)?;
    Some((glyphs, j - start))
}
