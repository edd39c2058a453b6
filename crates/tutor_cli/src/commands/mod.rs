//! Subcommand handlers.

pub mod check;
pub mod patterns;
pub mod solve;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tutor_api_models::{TaskDescriptor, TaskRecord};

pub const EXIT_OK: u8 = 0;
/// A task failed or an answer did not match.
pub const EXIT_UNSOLVED: u8 = 1;
/// Unreadable input or arguments.
pub const EXIT_ERROR: u8 = 2;

/// Accept either a descriptor (`task_type`, `parameters`) or a task-bank
/// record (`task_number`, `variables`).
pub fn task_from_value(value: Value) -> Result<TaskDescriptor> {
    if value.get("task_type").is_some() {
        return TaskDescriptor::deserialize(value).context("invalid task descriptor");
    }
    let record = TaskRecord::deserialize(value).context("invalid task record")?;
    Ok(record.into())
}

pub fn read_json(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_and_record_both_load() {
        let descriptor = task_from_value(json!({
            "id": "d", "task_type": 6, "subtype": "fractions",
            "pattern": "fraction_expression", "parameters": {}
        }))
        .unwrap();
        assert_eq!(descriptor.task_type, 6);

        let record = task_from_value(json!({
            "id": "r", "task_number": 13, "subtype": "rational_inequalities",
            "pattern": "shifted_square", "variables": {"p": 1, "m": 2, "sign": "<"},
            "answer": "(1; 3)"
        }))
        .unwrap();
        assert_eq!(record.task_type, 13);
        assert_eq!(record.answer, Some(json!("(1; 3)")));
    }

    #[test]
    fn missing_routing_fields_are_an_error() {
        assert!(task_from_value(json!({"id": "x"})).is_err());
    }
}
