//! Arithmetic-expression patterns: fractions, decimals, powers of ten.

use crate::error::SolveError;
use crate::narration;
use crate::params::fields::{EXPRESSION, EXTRACT};
use crate::procedure::{Procedure, ProcedureContext, ProcedureOutput, RawStep};
use num_rational::BigRational;
use tutor_api_models::{AnswerValue, TaskDescriptor};
use tutor_formatter::canonical_rational;
use tutor_math::{evaluate_with_steps, ExprNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticFamily {
    Fractions,
    Decimals,
    PowersOfTen,
}

impl ArithmeticFamily {
    fn idea(self) -> &'static str {
        match self {
            ArithmeticFamily::Fractions => narration::FRACTIONS_IDEA,
            ArithmeticFamily::Decimals => narration::DECIMALS_IDEA,
            ArithmeticFamily::PowersOfTen => narration::POWERS_IDEA,
        }
    }

    fn hints(self) -> &'static [&'static str] {
        match self {
            ArithmeticFamily::Fractions => &narration::FRACTIONS_HINTS,
            ArithmeticFamily::Decimals => &narration::DECIMALS_HINTS,
            ArithmeticFamily::PowersOfTen => &narration::POWERS_HINTS,
        }
    }
}

/// Which part of the result is the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    Value,
    Numerator,
    Denominator,
}

impl Extract {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "value" => Some(Extract::Value),
            "numerator" => Some(Extract::Numerator),
            "denominator" => Some(Extract::Denominator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticInput {
    pub expression: ExprNode,
    pub extract: Extract,
}

impl ArithmeticInput {
    pub fn read(task: &TaskDescriptor, ctx: &ProcedureContext) -> Result<Self, SolveError> {
        let reader = ctx.reader(task);
        let expression = reader
            .deserialize::<ExprNode>(EXPRESSION)?
            .ok_or_else(|| SolveError::missing(EXPRESSION.primary))?;

        let extract = match reader.string(EXTRACT)? {
            // Absent: the whole value is the answer.
            None => Extract::Value,
            Some(text) => Extract::parse(text).ok_or_else(|| {
                SolveError::invalid(
                    EXTRACT.primary,
                    format!("ожидалось value, numerator или denominator, получено '{}'", text),
                )
            })?,
        };

        Ok(Self {
            expression,
            extract,
        })
    }
}

pub struct ArithmeticProcedure {
    family: ArithmeticFamily,
}

impl ArithmeticProcedure {
    pub fn new(family: ArithmeticFamily) -> Self {
        Self { family }
    }
}

impl Procedure for ArithmeticProcedure {
    fn name(&self) -> &str {
        match self.family {
            ArithmeticFamily::Fractions => "arithmetic.fractions",
            ArithmeticFamily::Decimals => "arithmetic.decimals",
            ArithmeticFamily::PowersOfTen => "arithmetic.powers_of_ten",
        }
    }

    fn solve(
        &self,
        task: &TaskDescriptor,
        ctx: &ProcedureContext,
    ) -> Result<ProcedureOutput, SolveError> {
        let input = ArithmeticInput::read(task, ctx)?;
        let evaluation = evaluate_with_steps(&input.expression)?;

        tracing::debug!(
            target: "solve",
            procedure = self.name(),
            ops = input.expression.op_count(),
            steps = evaluation.steps.len(),
            "expression_evaluated"
        );

        let mut steps: Vec<RawStep> = evaluation
            .steps
            .iter()
            .map(|s| RawStep::new(s.description.clone(), s.formula.clone(), s.result.clone()))
            .collect();

        let rendered = input.expression.render();
        let answer = match input.extract {
            Extract::Value => {
                steps.push(RawStep::new(
                    narration::FINAL_ANSWER_STEP,
                    rendered,
                    canonical_rational(&evaluation.value),
                ));
                evaluation.value
            }
            Extract::Numerator | Extract::Denominator => {
                let (description, part) = if input.extract == Extract::Numerator {
                    (narration::NUMERATOR_STEP, evaluation.value.numer().clone())
                } else {
                    (narration::DENOMINATOR_STEP, evaluation.value.denom().clone())
                };
                let part = BigRational::from_integer(part);
                steps.push(RawStep::new(
                    description,
                    canonical_rational(&evaluation.value),
                    canonical_rational(&part),
                ));
                steps.push(RawStep::new(
                    narration::FINAL_ANSWER_STEP,
                    rendered,
                    canonical_rational(&part),
                ));
                part
            }
        };

        Ok(ProcedureOutput {
            explanation: self.family.idea().to_string(),
            steps,
            answer: AnswerValue::Number(canonical_rational(&answer)),
            unit: None,
            hints: self.family.hints().iter().map(|h| h.to_string()).collect(),
        })
    }
}
