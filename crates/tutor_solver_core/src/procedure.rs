use crate::error::SolveError;
use crate::params::{AliasPolicy, ParamReader};
use tutor_api_models::{AnswerValue, TaskDescriptor};

/// Settings shared by every procedure invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcedureContext {
    pub alias_policy: AliasPolicy,
}

impl ProcedureContext {
    pub fn reader<'a>(&self, task: &'a TaskDescriptor) -> ParamReader<'a> {
        ParamReader::new(&task.parameters, self.alias_policy)
    }
}

/// One derivation step in machine text; numbering and display formatting
/// happen at assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStep {
    pub description: String,
    pub formula: String,
    pub result: String,
    pub unit: Option<String>,
}

impl RawStep {
    pub fn new(
        description: impl Into<String>,
        formula: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            formula: formula.into(),
            result: result.into(),
            unit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureOutput {
    pub explanation: String,
    pub steps: Vec<RawStep>,
    pub answer: AnswerValue,
    pub unit: Option<String>,
    pub hints: Vec<String>,
}

/// A closed-form calculator for one pattern family.
///
/// Implementations are pure: the same descriptor always yields the same output.
pub trait Procedure: Send + Sync {
    fn name(&self) -> &str;

    fn solve(
        &self,
        task: &TaskDescriptor,
        ctx: &ProcedureContext,
    ) -> Result<ProcedureOutput, SolveError>;
}
