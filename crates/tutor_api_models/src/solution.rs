//! Outbound records: the canonical `solution_core` and its parts.

use serde::{Deserialize, Serialize};

/// Unit marker for results without a physical unit.
pub const NO_UNIT: &str = "N/A";

/// One ordered unit of the derivation trail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CalculationStep {
    /// 1-based, sequential, no gaps.
    pub step_number: usize,
    pub description: String,
    pub formula_representation: String,
    pub calculation_result: String,
    pub result_unit: String,
}

/// One interval of a solution set. `None` bounds are infinite.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IntervalValue {
    pub lower: Option<String>,
    pub lower_closed: bool,
    pub upper: Option<String>,
    pub upper_closed: bool,
}

impl IntervalValue {
    /// A degenerate closed interval `[p; p]`.
    pub fn is_point(&self) -> bool {
        self.lower_closed && self.upper_closed && self.lower.is_some() && self.lower == self.upper
    }
}

/// Machine form of a final answer. The variant is fixed per pattern.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Exact rational in canonical text: `"-3"` or `"11/12"`.
    Number(String),
    Text(String),
    Sequence(Vec<String>),
    /// Ordered union of intervals; empty means the empty set.
    Intervals(Vec<IntervalValue>),
    /// Only used by failure payloads.
    Undetermined,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FinalAnswer {
    pub value_machine: AnswerValue,
    pub value_display: String,
    pub unit: String,
}

impl FinalAnswer {
    pub fn undetermined() -> Self {
        Self {
            value_machine: AnswerValue::Undetermined,
            value_display: String::new(),
            unit: NO_UNIT.to_string(),
        }
    }
}

/// Failure taxonomy shared with the rendering layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownPattern,
    MissingRequiredParameter,
    InvalidParameter,
    DivisionByZero,
    UndefinedOperation,
    ProcedureCrashed,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnknownPattern => "unknown_pattern",
            FailureKind::MissingRequiredParameter => "missing_required_parameter",
            FailureKind::InvalidParameter => "invalid_parameter",
            FailureKind::DivisionByZero => "division_by_zero",
            FailureKind::UndefinedOperation => "undefined_operation",
            FailureKind::ProcedureCrashed => "procedure_crashed",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    /// User-safe summary.
    pub message: String,
    /// Diagnostic detail (original panic message for crashed procedures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// The sole externally visible artifact of the core.
///
/// Success and failure share this shape: a failure carries `failure`, an
/// empty `calculation_steps` and an undetermined answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SolutionCore {
    pub question_id: String,
    pub explanation_idea: String,
    pub calculation_steps: Vec<CalculationStep>,
    pub final_answer: FinalAnswer,
    pub hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl SolutionCore {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_value_uses_kind_tag() {
        let v = serde_json::to_value(AnswerValue::Number("11/12".into())).unwrap();
        assert_eq!(v, json!({"kind": "number", "value": "11/12"}));

        let v = serde_json::to_value(AnswerValue::Undetermined).unwrap();
        assert_eq!(v, json!({"kind": "undetermined"}));
    }

    #[test]
    fn failure_is_omitted_on_success() {
        let core = SolutionCore {
            question_id: "q".into(),
            explanation_idea: "idea".into(),
            calculation_steps: vec![],
            final_answer: FinalAnswer::undetermined(),
            hints: vec![],
            failure: None,
        };
        let v = serde_json::to_value(&core).unwrap();
        assert!(v.get("failure").is_none());
        assert!(core.is_success());
    }

    #[test]
    fn failure_kind_serializes_snake_case() {
        let v = serde_json::to_value(FailureKind::DivisionByZero).unwrap();
        assert_eq!(v, json!("division_by_zero"));
        assert_eq!(FailureKind::DivisionByZero.as_str(), "division_by_zero");
    }

    #[test]
    fn point_interval_detection() {
        let p = IntervalValue {
            lower: Some("3".into()),
            lower_closed: true,
            upper: Some("3".into()),
            upper_closed: true,
        };
        assert!(p.is_point());
        let open = IntervalValue {
            lower: None,
            lower_closed: false,
            upper: Some("3".into()),
            upper_closed: true,
        };
        assert!(!open.is_point());
    }
}
