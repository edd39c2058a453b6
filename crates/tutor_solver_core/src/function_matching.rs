//! Matching labelled graphs to numbered formulas.

use crate::error::SolveError;
use crate::narration;
use crate::params::fields::{GRAPHS, OPTIONS};
use crate::params::Field;
use crate::procedure::{Procedure, ProcedureContext, ProcedureOutput, RawStep};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tutor_api_models::{AnswerValue, TaskDescriptor};
use tutor_math::{classify_formula, parse_curve, Curve, CurveKind};

const ANSWER_SEPARATOR: &str = ";";

/// A formula with its heuristic kind and, when readable, exact coefficients.
#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    label: String,
    text: String,
    kind: CurveKind,
    curve: Option<Curve>,
}

impl Candidate {
    fn new(label: &str, text: &str) -> Self {
        let curve = match parse_curve(text) {
            Ok(curve) => Some(curve),
            Err(err) => {
                tracing::debug!(target: "solve", label, error = %err, "formula_not_parsed");
                None
            }
        };
        Self {
            label: label.to_string(),
            text: text.to_string(),
            kind: classify_formula(text),
            curve,
        }
    }

    fn formula(&self) -> String {
        self.curve
            .as_ref()
            .map(Curve::formula)
            .unwrap_or_else(|| self.text.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Match {
    Exact(String),
    BySigns(String),
    Undetermined,
}

fn find_match(graph: &Candidate, options: &[Candidate]) -> Match {
    let Some(curve) = &graph.curve else {
        return Match::Undetermined;
    };

    if let Some(exact) = options.iter().find(|o| o.curve.as_ref() == Some(curve)) {
        return Match::Exact(exact.label.clone());
    }

    let signature = curve.signature();
    let mut alike = options.iter().filter(|o| {
        o.kind == graph.kind && o.curve.as_ref().map(Curve::signature).as_ref() == Some(&signature)
    });
    match (alike.next(), alike.next()) {
        (Some(only), None) => Match::BySigns(only.label.clone()),
        _ => Match::Undetermined,
    }
}

/// Numeric labels in numeric order, the rest after them alphabetically.
fn label_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn read_formulas(map: &Map<String, Value>, field: Field) -> Result<Vec<Candidate>, SolveError> {
    if map.is_empty() {
        return Err(SolveError::invalid(field.primary, "пустой список формул"));
    }
    let mut labels: Vec<&String> = map.keys().collect();
    labels.sort_by(|a, b| label_order(a, b));
    labels
        .into_iter()
        .map(|label| match map.get(label) {
            Some(Value::String(text)) => Ok(Candidate::new(label, text)),
            _ => Err(SolveError::invalid(
                format!("{}.{}", field.primary, label),
                "ожидалась формула в виде строки",
            )),
        })
        .collect()
}

pub struct FunctionMatchingProcedure;

impl Procedure for FunctionMatchingProcedure {
    fn name(&self) -> &str {
        "function_matching"
    }

    fn solve(
        &self,
        task: &TaskDescriptor,
        ctx: &ProcedureContext,
    ) -> Result<ProcedureOutput, SolveError> {
        let reader = ctx.reader(task);
        let graphs = reader
            .object(GRAPHS)?
            .ok_or_else(|| SolveError::missing(GRAPHS.primary))?;
        let options = reader
            .object(OPTIONS)?
            .ok_or_else(|| SolveError::missing(OPTIONS.primary))?;
        let graphs = read_formulas(graphs, GRAPHS)?;
        let options = read_formulas(options, OPTIONS)?;

        let mut steps = Vec::new();
        for option in &options {
            steps.push(RawStep::new(
                narration::classify_option_message(&option.label),
                option.formula(),
                option.kind.name(),
            ));
        }

        // One-character labels concatenate into the exam digit string;
        // longer ones are separated so `1`,`12` and `11`,`2` stay distinct.
        let separator = if options.iter().all(|o| o.label.chars().count() == 1) {
            ""
        } else {
            ANSWER_SEPARATOR
        };
        let mut picks: Vec<String> = Vec::with_capacity(graphs.len());
        for graph in &graphs {
            let features = graph
                .curve
                .as_ref()
                .map(|c| c.features().join("; "))
                .unwrap_or_default();
            let found = find_match(graph, &options);
            tracing::trace!(target: "solve", label = %graph.label, found = ?found, "graph_matched");

            let result = match &found {
                Match::Exact(label) | Match::BySigns(label) => {
                    picks.push(label.clone());
                    format!("№{}", label)
                }
                Match::Undetermined => {
                    picks.push("?".to_string());
                    narration::UNDETERMINED_MATCH.to_string()
                }
            };
            steps.push(RawStep::new(
                narration::graph_match_message(&graph.label, &features),
                graph.formula(),
                result,
            ));
        }

        let answer = picks.join(separator);
        let labels: String = graphs.iter().map(|g| g.label.as_str()).collect();
        steps.push(RawStep::new(
            narration::FINAL_ANSWER_STEP,
            labels,
            answer.clone(),
        ));

        Ok(ProcedureOutput {
            explanation: narration::FUNCTION_MATCHING_IDEA.to_string(),
            steps,
            answer: AnswerValue::Text(answer),
            unit: None,
            hints: narration::FUNCTION_MATCHING_HINTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        })
    }
}
