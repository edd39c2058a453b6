//! Checking a solved answer against the task's ground truth.
//!
//! Equivalent notations are accepted: `0.25`, `"0,25"` and `"1/4"` all match
//! the number `1/4`; interval answers compare by display text.

use serde_json::Value;
use tutor_api_models::{AnswerValue, IntervalValue, SolutionCore, TaskDescriptor};
use tutor_formatter::{format_answer, format_intervals, format_text, parse_rational};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch { expected: String, actual: String },
    /// Solved, but the task carries no ground truth.
    NoGroundTruth,
    /// The solution is a failure core.
    Unsolved,
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Display form without whitespace, for notation-insensitive comparison.
fn normalized(text: &str) -> String {
    format_text(text).chars().filter(|c| !c.is_whitespace()).collect()
}

/// Interval text with bank shorthand (`inf`, `U`) read as glyphs.
fn normalized_intervals(text: &str) -> String {
    normalized(text)
        .replace("inf", "∞")
        .replace('U', "∪")
        .replace("+∞", "∞")
}

fn same_number(expected: &str, actual: &str) -> bool {
    match (parse_rational(expected), parse_rational(actual)) {
        (Some(e), Some(a)) => e == a,
        _ => normalized(expected) == normalized(actual),
    }
}

pub fn answers_match(expected: &Value, actual: &AnswerValue) -> bool {
    match actual {
        AnswerValue::Number(text) => value_text(expected).is_some_and(|e| same_number(&e, text)),
        AnswerValue::Text(text) => value_text(expected).is_some_and(|e| normalized(&e) == normalized(text)),
        AnswerValue::Sequence(items) => {
            let expected_items: Vec<String> = match expected {
                Value::Array(values) => match values.iter().map(value_text).collect::<Option<Vec<_>>>() {
                    Some(items) => items,
                    None => return false,
                },
                Value::String(s) => s.split(';').map(str::to_string).collect(),
                _ => return false,
            };
            expected_items.len() == items.len()
                && expected_items
                    .iter()
                    .zip(items)
                    .all(|(e, a)| normalized(e) == normalized(a))
        }
        AnswerValue::Intervals(values) => {
            let expected_display = match expected {
                Value::String(s) => format_text(s),
                Value::Array(_) => match serde_json::from_value::<Vec<IntervalValue>>(expected.clone()) {
                    Ok(intervals) => format_intervals(&intervals),
                    Err(_) => return false,
                },
                _ => return false,
            };
            normalized_intervals(&expected_display) == normalized_intervals(&format_intervals(values))
        }
        AnswerValue::Undetermined => false,
    }
}

pub fn verify(task: &TaskDescriptor, core: &SolutionCore) -> Verdict {
    if !core.is_success() {
        return Verdict::Unsolved;
    }
    let Some(expected) = &task.answer else {
        return Verdict::NoGroundTruth;
    };
    let actual = &core.final_answer.value_machine;
    if answers_match(expected, actual) {
        Verdict::Match
    } else {
        Verdict::Mismatch {
            expected: value_text(expected).unwrap_or_else(|| expected.to_string()),
            actual: format_answer(actual),
        }
    }
}
