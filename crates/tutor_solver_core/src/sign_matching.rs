//! Orientation statements read off coefficient signs.

use crate::error::SolveError;
use crate::narration::{self, VertexSide};
use crate::params::fields::{COEF_A, COEF_B, COEF_C, CURVES, SLOPE_K};
use crate::params::ParamReader;
use crate::procedure::{Procedure, ProcedureContext, ProcedureOutput, RawStep};
use num_rational::BigRational;
use num_traits::Zero;
use serde_json::Value;
use std::cmp::Ordering;
use tutor_api_models::{AnswerValue, TaskDescriptor};
use tutor_formatter::{machine_number, polynomial_formula, Term};
use tutor_math::numeric::{int, sign_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFamily {
    Quadratic,
    Linear,
}

/// `y = ax² + bx + c`; absent coefficients stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadraticCoefficients {
    pub a: Option<BigRational>,
    pub b: Option<BigRational>,
    pub c: Option<BigRational>,
}

/// `y = kx + b`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCoefficients {
    pub k: Option<BigRational>,
    pub b: Option<BigRational>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Coefficients {
    Quadratic(QuadraticCoefficients),
    Linear(LinearCoefficients),
}

fn term(value: &Option<BigRational>, name: &str, power: u32) -> Term {
    match value {
        Some(v) => Term::known(v.clone(), power),
        None => Term::symbol(name, power),
    }
}

fn intercept_statement(value: &BigRational) -> &'static str {
    match sign_of(value) {
        Ordering::Greater => narration::CROSSES_ABOVE,
        Ordering::Less => narration::CROSSES_BELOW,
        Ordering::Equal => narration::THROUGH_ORIGIN,
    }
}

fn slope_statement(value: &BigRational) -> &'static str {
    match sign_of(value) {
        Ordering::Greater => narration::INCREASING,
        Ordering::Less => narration::DECREASING,
        Ordering::Equal => narration::HORIZONTAL,
    }
}

impl Coefficients {
    fn formula(&self) -> String {
        let rhs = match self {
            Coefficients::Quadratic(q) => polynomial_formula(
                "x",
                &[term(&q.a, "a", 2), term(&q.b, "b", 1), term(&q.c, "c", 0)],
            ),
            Coefficients::Linear(l) => {
                polynomial_formula("x", &[term(&l.k, "k", 1), term(&l.b, "b", 0)])
            }
        };
        format!("y = {}", rhs)
    }

    fn statements(&self) -> Vec<String> {
        match self {
            Coefficients::Quadratic(q) => quadratic_statements(q),
            Coefficients::Linear(l) => linear_statements(l),
        }
    }
}

fn quadratic_statements(q: &QuadraticCoefficients) -> Vec<String> {
    let mut out = Vec::new();

    match &q.a {
        None => out.push(narration::not_given_message(
            "a",
            "направление ветвей определить нельзя",
        )),
        Some(a) if a.is_zero() => {
            out.push(narration::NOT_A_PARABOLA.to_string());
            match &q.b {
                Some(b) => out.push(slope_statement(b).to_string()),
                None => out.push(narration::not_given_message("b", "наклон прямой определить нельзя")),
            }
        }
        Some(a) if sign_of(a) == Ordering::Greater => out.push(narration::BRANCHES_UP.to_string()),
        Some(_) => out.push(narration::BRANCHES_DOWN.to_string()),
    }

    match &q.c {
        Some(c) => out.push(intercept_statement(c).to_string()),
        None => out.push(narration::not_given_message(
            "c",
            "точку пересечения с осью Y определить нельзя",
        )),
    }

    match (&q.a, &q.b) {
        (Some(a), _) if a.is_zero() => {}
        (Some(a), Some(b)) => {
            let x0 = -b / (int(2) * a);
            let side = match sign_of(&x0) {
                Ordering::Greater => VertexSide::Right,
                Ordering::Less => VertexSide::Left,
                Ordering::Equal => VertexSide::OnAxis,
            };
            out.push(narration::vertex_message(&machine_number(&x0), side));
        }
        (_, None) => out.push(narration::not_given_message(
            "b",
            "положение вершины определить нельзя",
        )),
        (None, Some(_)) => out.push(narration::not_given_message(
            "a",
            "положение вершины определить нельзя",
        )),
    }

    out
}

fn linear_statements(l: &LinearCoefficients) -> Vec<String> {
    let mut out = Vec::new();
    match &l.k {
        Some(k) => out.push(slope_statement(k).to_string()),
        None => out.push(narration::not_given_message("k", "наклон прямой определить нельзя")),
    }
    match &l.b {
        Some(b) => out.push(intercept_statement(b).to_string()),
        None => out.push(narration::not_given_message(
            "b",
            "точку пересечения с осью Y определить нельзя",
        )),
    }
    out
}

pub struct SignMatchingProcedure {
    family: CurveFamily,
}

impl SignMatchingProcedure {
    pub fn new(family: CurveFamily) -> Self {
        Self { family }
    }

    fn read_coefficients(&self, reader: &ParamReader<'_>) -> Result<Coefficients, SolveError> {
        Ok(match self.family {
            CurveFamily::Quadratic => Coefficients::Quadratic(QuadraticCoefficients {
                a: reader.rational(COEF_A)?,
                b: reader.rational(COEF_B)?,
                c: reader.rational(COEF_C)?,
            }),
            CurveFamily::Linear => Coefficients::Linear(LinearCoefficients {
                k: reader.rational(SLOPE_K)?,
                b: reader.rational(COEF_B)?,
            }),
        })
    }

    fn has_any_coefficient(&self, reader: &ParamReader<'_>) -> bool {
        match self.family {
            CurveFamily::Quadratic => [COEF_A, COEF_B, COEF_C].iter().any(|f| reader.has(*f)),
            CurveFamily::Linear => [SLOPE_K, COEF_B].iter().any(|f| reader.has(*f)),
        }
    }

    /// Labelled curves in label order; a payload of bare coefficients is one
    /// unlabelled curve.
    fn read_curves(&self, reader: &ParamReader<'_>) -> Result<Vec<(String, Coefficients)>, SolveError> {
        let Some(curves) = reader.object(CURVES)? else {
            if !self.has_any_coefficient(reader) {
                return Err(SolveError::missing(CURVES.primary));
            }
            return Ok(vec![(String::new(), self.read_coefficients(reader)?)]);
        };
        if curves.is_empty() {
            return Err(SolveError::invalid(CURVES.primary, "пустой список кривых"));
        }

        let mut labels: Vec<&String> = curves.keys().collect();
        labels.sort();
        labels
            .into_iter()
            .map(|label| match curves.get(label) {
                Some(Value::Object(map)) => {
                    let nested = reader.nested(map, &format!("{}.{}", CURVES.primary, label));
                    Ok((label.clone(), self.read_coefficients(&nested)?))
                }
                _ => Err(SolveError::invalid(
                    format!("{}.{}", CURVES.primary, label),
                    "ожидался объект с коэффициентами",
                )),
            })
            .collect()
    }
}

impl Procedure for SignMatchingProcedure {
    fn name(&self) -> &str {
        match self.family {
            CurveFamily::Quadratic => "sign_matching.quadratic",
            CurveFamily::Linear => "sign_matching.linear",
        }
    }

    fn solve(
        &self,
        task: &TaskDescriptor,
        ctx: &ProcedureContext,
    ) -> Result<ProcedureOutput, SolveError> {
        let reader = ctx.reader(task);
        let curves = self.read_curves(&reader)?;

        let mut steps = Vec::new();
        let mut formulas = Vec::new();
        for (label, coefficients) in &curves {
            let formula = coefficients.formula();
            steps.push(RawStep::new(
                narration::analyse_curve_message(label),
                formula.clone(),
                coefficients.statements().join("; "),
            ));
            formulas.push(formula);
        }

        let labels: Vec<&str> = curves
            .iter()
            .map(|(label, _)| label.as_str())
            .filter(|l| !l.is_empty())
            .collect();
        steps.push(RawStep::new(
            narration::FINAL_ANSWER_STEP,
            labels.join(", "),
            formulas.join("; "),
        ));

        let explanation = match self.family {
            CurveFamily::Quadratic => narration::QUADRATIC_SIGNS_IDEA,
            CurveFamily::Linear => narration::LINEAR_SIGNS_IDEA,
        };

        Ok(ProcedureOutput {
            explanation: explanation.to_string(),
            steps,
            answer: AnswerValue::Sequence(formulas),
            unit: None,
            hints: narration::SIGN_MATCHING_HINTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        })
    }
}
