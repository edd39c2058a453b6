//! Raw procedure output → canonical `SolutionCore`.

use crate::options::EngineOptions;
use tutor_api_models::{
    CalculationStep, Failure, FailureKind, FinalAnswer, SolutionCore, TaskDescriptor, NO_UNIT,
};
use tutor_formatter::{format_answer, format_text};
use tutor_math::MathError;
use tutor_solver_core::narration::FINAL_ANSWER_STEP;
use tutor_solver_core::{ProcedureOutput, SolveError};

pub const FALLBACK_IDEA: &str = "Решаем задачу по шагам, записывая каждое преобразование.";

fn unit_or_na(unit: Option<String>) -> String {
    match unit {
        Some(u) if !u.trim().is_empty() => u,
        _ => NO_UNIT.to_string(),
    }
}

fn is_minus(c: char) -> bool {
    c == '-' || c == '−'
}

/// Characters that glue onto a number: digits, letters, superscripts.
fn joins(c: Option<char>) -> bool {
    c.is_some_and(char::is_alphanumeric)
}

/// A separator (`,` `.` `/`) that continues a number when a digit follows it.
fn continues(sep: Option<char>, next: Option<char>) -> bool {
    matches!(sep, Some(',' | '.' | '/')) && next.is_some_and(|c| c.is_ascii_digit())
}

/// A hint reveals the answer when it contains the displayed value as a whole
/// token, not as part of a longer number or word.
fn reveals(hint: &str, display: &str) -> bool {
    if display.is_empty() {
        return false;
    }
    let signed = display.starts_with(is_minus);
    hint.match_indices(display).any(|(start, matched)| {
        let mut before = hint[..start].chars().rev();
        let prev = before.next();
        let prev2 = before.next();
        let mut after = hint[start + matched.len()..].chars();
        let next = after.next();
        let next2 = after.next();

        let glued_before = joins(prev)
            || (!signed && prev.is_some_and(is_minus))
            || (matches!(prev, Some(',' | '.' | '/')) && prev2.is_some_and(|c| c.is_ascii_digit()));
        let glued_after = joins(next) || continues(next, next2);
        !glued_before && !glued_after
    })
}

pub fn assemble_success(
    task: &TaskDescriptor,
    output: ProcedureOutput,
    options: &EngineOptions,
) -> SolutionCore {
    let ProcedureOutput {
        explanation,
        mut steps,
        answer,
        unit,
        hints,
    } = output;

    let value_display = format_answer(&answer);

    if steps.is_empty() {
        steps.push(tutor_solver_core::RawStep::new(
            FINAL_ANSWER_STEP,
            String::new(),
            value_display.clone(),
        ));
    }

    let calculation_steps = steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| CalculationStep {
            step_number: i + 1,
            description: format_text(&step.description),
            formula_representation: format_text(&step.formula),
            calculation_result: format_text(&step.result),
            result_unit: unit_or_na(step.unit),
        })
        .collect();

    let explanation_idea = if explanation.trim().is_empty() {
        FALLBACK_IDEA.to_string()
    } else {
        explanation
    };

    let hints = hints
        .iter()
        .map(|h| format_text(h))
        .filter(|h| {
            let keep = !options.filter_revealing_hints || !reveals(h, &value_display);
            if !keep {
                tracing::debug!(target: "assemble", task_id = %task.id, "revealing_hint_dropped");
            }
            keep
        })
        .collect();

    SolutionCore {
        question_id: task.id.clone(),
        explanation_idea,
        calculation_steps,
        final_answer: FinalAnswer {
            value_machine: answer,
            value_display,
            unit: unit_or_na(unit),
        },
        hints,
        failure: None,
    }
}

pub fn assemble_failure(question_id: &str, failure: Failure) -> SolutionCore {
    SolutionCore {
        question_id: question_id.to_string(),
        explanation_idea: failure.message.clone(),
        calculation_steps: Vec::new(),
        final_answer: FinalAnswer::undetermined(),
        hints: Vec::new(),
        failure: Some(failure),
    }
}

pub fn failure_kind(err: &SolveError) -> FailureKind {
    match err {
        SolveError::MissingParameter { .. } => FailureKind::MissingRequiredParameter,
        SolveError::InvalidParameter { .. } => FailureKind::InvalidParameter,
        SolveError::DivisionByZero { .. } => FailureKind::DivisionByZero,
        SolveError::UndefinedOperation { .. } => FailureKind::UndefinedOperation,
        SolveError::Math(math) => match math {
            MathError::DivisionByZero { .. } => FailureKind::DivisionByZero,
            MathError::Undefined { .. } => FailureKind::UndefinedOperation,
            MathError::Malformed { .. }
            | MathError::InvalidNumber { .. }
            | MathError::UnsupportedFormula { .. } => FailureKind::InvalidParameter,
        },
    }
}

pub fn failure_from_error(err: &SolveError) -> Failure {
    Failure {
        kind: failure_kind(err),
        message: err.to_string(),
        detail: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use tutor_api_models::AnswerValue;
    use tutor_solver_core::narration::POWERS_HINTS;
    use tutor_solver_core::RawStep;

    fn task() -> TaskDescriptor {
        TaskDescriptor::new("q1", 6, "fractions", "fraction_expression", Map::new())
    }

    fn output(steps: Vec<RawStep>, hints: Vec<&str>) -> ProcedureOutput {
        ProcedureOutput {
            explanation: String::new(),
            steps,
            answer: AnswerValue::Number("-1/4".into()),
            unit: None,
            hints: hints.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn numbers_steps_and_formats_text() {
        let steps = vec![
            RawStep::new("Складываем", "1/4 + (-1/2)", "-1/4"),
            RawStep::new(FINAL_ANSWER_STEP, "x^2*3", "-0.25"),
        ];
        let core = assemble_success(&task(), output(steps, vec![]), &EngineOptions::default());
        let numbers: Vec<usize> = core.calculation_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, [1, 2]);
        assert_eq!(core.calculation_steps[0].formula_representation, "1/4 + (−1/2)");
        assert_eq!(core.calculation_steps[1].formula_representation, "x²·3");
        assert_eq!(core.calculation_steps[1].calculation_result, "−0,25");
        assert_eq!(core.calculation_steps[0].result_unit, NO_UNIT);
        assert_eq!(core.final_answer.value_display, "−0,25");
        assert_eq!(core.final_answer.unit, NO_UNIT);
        assert_eq!(core.explanation_idea, FALLBACK_IDEA);
    }

    #[test]
    fn empty_steps_get_an_answer_step() {
        let core = assemble_success(&task(), output(vec![], vec![]), &EngineOptions::default());
        assert_eq!(core.calculation_steps.len(), 1);
        assert_eq!(core.calculation_steps[0].description, FINAL_ANSWER_STEP);
    }

    #[test]
    fn revealing_hints_are_dropped_unless_disabled() {
        let hints = vec!["Ответ: −0,25", "Приведите к общему знаменателю"];
        let core = assemble_success(
            &task(),
            output(vec![RawStep::new("a", "b", "c")], hints.clone()),
            &EngineOptions::default(),
        );
        assert_eq!(core.hints, ["Приведите к общему знаменателю"]);

        let keep_all = EngineOptions {
            filter_revealing_hints: false,
            ..EngineOptions::default()
        };
        let core = assemble_success(&task(), output(vec![RawStep::new("a", "b", "c")], hints), &keep_all);
        assert_eq!(core.hints.len(), 2);
    }

    fn with_answer(answer: &str, hints: &[&str]) -> SolutionCore {
        let output = ProcedureOutput {
            explanation: String::new(),
            steps: vec![RawStep::new("a", "b", "c")],
            answer: AnswerValue::Number(answer.into()),
            unit: None,
            hints: hints.iter().map(|h| h.to_string()).collect(),
        };
        assemble_success(&task(), output, &EngineOptions::default())
    }

    #[test]
    fn short_answers_keep_general_hints() {
        let core = with_answer("1", &POWERS_HINTS);
        assert_eq!(core.hints.len(), 2);

        for answer in ["0", "2", "10"] {
            let core = with_answer(answer, &["Умножение на 10ⁿ переносит запятую на 2,5 знака, 100 и 1/20"]);
            assert_eq!(core.hints.len(), 1, "answer {}", answer);
        }
    }

    #[test]
    fn whole_token_answers_are_still_dropped() {
        assert!(with_answer("1", &["Ответ: 1."]).hints.is_empty());
        assert!(with_answer("10", &["Получится 10, проверьте"]).hints.is_empty());
        assert!(with_answer("-3", &["x = −3"]).hints.is_empty());
        assert_eq!(with_answer("3", &["x = −3"]).hints.len(), 1);
        assert_eq!(with_answer("1/4", &["x = 11/45"]).hints.len(), 1);
    }

    #[test]
    fn failure_shape() {
        let err = SolveError::missing("m");
        let core = assemble_failure("q9", failure_from_error(&err));
        assert!(core.calculation_steps.is_empty());
        assert_eq!(core.final_answer, FinalAnswer::undetermined());
        assert_eq!(core.failure_kind(), Some(FailureKind::MissingRequiredParameter));
        assert_eq!(core.explanation_idea, err.to_string());
    }

    #[test]
    fn math_errors_map_to_failure_kinds() {
        let err = SolveError::from(MathError::division_by_zero("x : 0"));
        assert_eq!(failure_kind(&err), FailureKind::DivisionByZero);
        let err = SolveError::from(MathError::undefined("0^0"));
        assert_eq!(failure_kind(&err), FailureKind::UndefinedOperation);
        let err = SolveError::from(MathError::malformed("arity"));
        assert_eq!(failure_kind(&err), FailureKind::InvalidParameter);
    }
}
