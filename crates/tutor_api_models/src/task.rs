//! Inbound records: the task descriptor and the task-bank record it is resolved from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Routing key of a solving procedure: `(task_type, subtype, pattern)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternKey {
    pub task_type: u32,
    pub subtype: String,
    pub pattern: String,
}

impl PatternKey {
    pub fn new(task_type: u32, subtype: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            task_type,
            subtype: subtype.into(),
            pattern: pattern.into(),
        }
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.task_type, self.subtype, self.pattern)
    }
}

/// A problem instance handed to the router. Immutable once dispatched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskDescriptor {
    pub id: String,
    pub task_type: u32,
    pub subtype: String,
    pub pattern: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Ground-truth answer, present when the task comes from a validated bank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
}

impl TaskDescriptor {
    pub fn new(
        id: impl Into<String>,
        task_type: u32,
        subtype: impl Into<String>,
        pattern: impl Into<String>,
        parameters: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            task_type,
            subtype: subtype.into(),
            pattern: pattern.into(),
            parameters,
            answer: None,
        }
    }

    pub fn with_answer(mut self, answer: Value) -> Self {
        self.answer = Some(answer);
        self
    }

    pub fn key(&self) -> PatternKey {
        PatternKey::new(self.task_type, self.subtype.clone(), self.pattern.clone())
    }

    /// Look up a raw parameter value by name.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }
}

/// One record of the task bank, as exported by the bank build tools.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub id: String,
    pub task_number: u32,
    pub subtype: String,
    pub pattern: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub answer_type: Option<String>,
    #[serde(default, alias = "parameters")]
    pub variables: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub meta: Value,
}

impl From<TaskRecord> for TaskDescriptor {
    fn from(record: TaskRecord) -> Self {
        TaskDescriptor {
            id: record.id,
            task_type: record.task_number,
            subtype: record.subtype,
            pattern: record.pattern,
            parameters: record.variables,
            answer: record.answer,
        }
    }
}
