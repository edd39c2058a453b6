//! `value_machine` → `value_display`.

use crate::interval::format_intervals;
use crate::number::{format_rational, parse_rational};
use crate::text::format_text;
use tutor_api_models::AnswerValue;

pub fn format_answer(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Number(text) => match parse_rational(text) {
            Some(n) => format_rational(&n),
            None => format_text(text),
        },
        AnswerValue::Text(text) => format_text(text),
        AnswerValue::Sequence(items) => items
            .iter()
            .map(|s| format_text(s))
            .collect::<Vec<_>>()
            .join("; "),
        AnswerValue::Intervals(intervals) => format_intervals(intervals),
        AnswerValue::Undetermined => String::new(),
    }
}
