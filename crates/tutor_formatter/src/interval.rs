//! Solution-set notation: `(−∞; −5] ∪ (0; 5]`, `{3}`, `∅`.

use crate::glyphs::{EMPTY_SET, INFINITY, MINUS, UNION};
use crate::number::{format_rational, parse_rational};
use crate::text::format_text;
use tutor_api_models::IntervalValue;

fn bound_text(bound: &str) -> String {
    match parse_rational(bound) {
        Some(value) => format_rational(&value),
        None => format_text(bound),
    }
}

fn interval_text(interval: &IntervalValue) -> String {
    if interval.is_point() {
        let point = interval.lower.as_deref().unwrap_or_default();
        return format!("{{{}}}", bound_text(point));
    }

    let open = if interval.lower_closed && interval.lower.is_some() { '[' } else { '(' };
    let close = if interval.upper_closed && interval.upper.is_some() { ']' } else { ')' };
    let lower = match &interval.lower {
        Some(b) => bound_text(b),
        None => format!("{}{}", MINUS, INFINITY),
    };
    let upper = match &interval.upper {
        Some(b) => bound_text(b),
        None => format!("+{}", INFINITY),
    };
    format!("{}{}; {}{}", open, lower, upper, close)
}

pub fn format_intervals(intervals: &[IntervalValue]) -> String {
    if intervals.is_empty() {
        return EMPTY_SET.to_string();
    }
    intervals
        .iter()
        .map(interval_text)
        .collect::<Vec<_>>()
        .join(&format!(" {} ", UNION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(lower: Option<&str>, lc: bool, upper: Option<&str>, uc: bool) -> IntervalValue {
        IntervalValue {
            lower: lower.map(str::to_string),
            lower_closed: lc,
            upper: upper.map(str::to_string),
            upper_closed: uc,
        }
    }

    #[test]
    fn union_of_half_open_intervals() {
        let set = [iv(None, false, Some("-5"), true), iv(Some("0"), false, Some("5"), true)];
        assert_eq!(format_intervals(&set), "(−∞; −5] ∪ (0; 5]");
    }

    #[test]
    fn empty_set_and_all_reals() {
        assert_eq!(format_intervals(&[]), "∅");
        assert_eq!(format_intervals(&[iv(None, false, None, false)]), "(−∞; +∞)");
    }

    #[test]
    fn isolated_point_and_fraction_bounds() {
        assert_eq!(format_intervals(&[iv(Some("3"), true, Some("3"), true)]), "{3}");
        assert_eq!(
            format_intervals(&[iv(Some("-1/3"), true, Some("5/2"), false)]),
            "[−1/3; 2,5)"
        );
    }
}
