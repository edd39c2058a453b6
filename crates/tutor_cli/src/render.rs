//! Plain-text rendering of a `SolutionCore` for terminal output.

use std::fmt::Write;
use tutor_api_models::{SolutionCore, NO_UNIT};

pub fn render_text(core: &SolutionCore) -> String {
    let mut out = String::new();

    if let Some(failure) = &core.failure {
        let _ = writeln!(out, "Задача {} не решена [{}]", core.question_id, failure.kind.as_str());
        let _ = writeln!(out, "{}", failure.message);
        if let Some(detail) = &failure.detail {
            let _ = writeln!(out, "  {}", detail);
        }
        return out;
    }

    let _ = writeln!(out, "Задача {}", core.question_id);
    let _ = writeln!(out, "Идея: {}", core.explanation_idea);
    let _ = writeln!(out);

    for step in &core.calculation_steps {
        let _ = writeln!(out, "{}. {}", step.step_number, step.description);
        let line = match (step.formula_representation.is_empty(), step.calculation_result.is_empty()) {
            (true, true) => continue,
            (true, false) => step.calculation_result.clone(),
            (false, true) => step.formula_representation.clone(),
            (false, false) => format!("{} → {}", step.formula_representation, step.calculation_result),
        };
        if step.result_unit == NO_UNIT {
            let _ = writeln!(out, "   {}", line);
        } else {
            let _ = writeln!(out, "   {} {}", line, step.result_unit);
        }
    }

    let _ = writeln!(out);
    let answer = &core.final_answer;
    if answer.unit == NO_UNIT {
        let _ = writeln!(out, "Ответ: {}", answer.value_display);
    } else {
        let _ = writeln!(out, "Ответ: {} {}", answer.value_display, answer.unit);
    }

    if !core.hints.is_empty() {
        let _ = writeln!(out, "Подсказки:");
        for hint in &core.hints {
            let _ = writeln!(out, "- {}", hint);
        }
    }
    out
}
