//! JSON wire contract of the records exchanged with the rendering layer.

use serde_json::json;
use tutor_api_models::{
    AnswerValue, CalculationStep, Failure, FailureKind, FinalAnswer, IntervalValue, SolutionCore,
    TaskDescriptor, TaskRecord, NO_UNIT,
};

#[test]
fn solution_core_field_names_are_stable() {
    let core = SolutionCore {
        question_id: "13-001".into(),
        explanation_idea: "Метод интервалов".into(),
        calculation_steps: vec![CalculationStep {
            step_number: 1,
            description: "Записываем ответ".into(),
            formula_representation: "x ≤ 25/x".into(),
            calculation_result: "(−∞; −5] ∪ (0; 5]".into(),
            result_unit: NO_UNIT.into(),
        }],
        final_answer: FinalAnswer {
            value_machine: AnswerValue::Intervals(vec![IntervalValue {
                lower: None,
                lower_closed: false,
                upper: Some("-5".into()),
                upper_closed: true,
            }]),
            value_display: "(−∞; −5]".into(),
            unit: NO_UNIT.into(),
        },
        hints: vec![],
        failure: None,
    };

    let value = serde_json::to_value(&core).unwrap();
    assert_eq!(
        value,
        json!({
            "question_id": "13-001",
            "explanation_idea": "Метод интервалов",
            "calculation_steps": [{
                "step_number": 1,
                "description": "Записываем ответ",
                "formula_representation": "x ≤ 25/x",
                "calculation_result": "(−∞; −5] ∪ (0; 5]",
                "result_unit": "N/A"
            }],
            "final_answer": {
                "value_machine": {"kind": "intervals", "value": [
                    {"lower": null, "lower_closed": false, "upper": "-5", "upper_closed": true}
                ]},
                "value_display": "(−∞; −5]",
                "unit": "N/A"
            },
            "hints": []
        })
    );

    let back: SolutionCore = serde_json::from_value(value).unwrap();
    assert_eq!(back, core);
}

#[test]
fn failure_core_carries_detail_only_when_present() {
    let failure = Failure {
        kind: FailureKind::ProcedureCrashed,
        message: "Внутренняя ошибка".into(),
        detail: None,
    };
    let value = serde_json::to_value(&failure).unwrap();
    assert_eq!(value, json!({"kind": "procedure_crashed", "message": "Внутренняя ошибка"}));

    let with_detail: Failure = serde_json::from_value(json!({
        "kind": "procedure_crashed", "message": "m", "detail": "attempt to divide by zero"
    }))
    .unwrap();
    assert_eq!(with_detail.detail.as_deref(), Some("attempt to divide by zero"));
}

#[test]
fn bank_record_becomes_descriptor() {
    let record: TaskRecord = serde_json::from_value(json!({
        "id": "6-014",
        "task_number": 6,
        "subtype": "decimals",
        "pattern": "decimal_expression",
        "question_text": "Найдите значение выражения",
        "answer": "-0,25",
        "answer_type": "number",
        "variables": {"expression": {"type": "decimal", "value": "-0.25"}},
        "meta": {"source": "bank"}
    }))
    .unwrap();

    let task = TaskDescriptor::from(record);
    assert_eq!(task.key().to_string(), "6/decimals/decimal_expression");
    assert_eq!(task.answer, Some(json!("-0,25")));
    assert!(task.param("expression").is_some());
}
