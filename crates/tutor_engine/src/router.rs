//! Task dispatch: registry lookup, panic fence, assembly.

use crate::assembler::{assemble_failure, assemble_success, failure_from_error};
use crate::options::EngineOptions;
use crate::registry::Registry;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tutor_api_models::{Failure, FailureKind, SolutionCore, TaskDescriptor};
use tutor_solver_core::ProcedureContext;

pub const UNKNOWN_PATTERN_MESSAGE: &str = "Этот тип задачи пока не поддерживается";
pub const CRASH_MESSAGE: &str = "Внутренняя ошибка решателя, задача не решена";

#[derive(Debug, Clone)]
pub struct Router {
    registry: Registry,
    options: EngineOptions,
}

impl Default for Router {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Router {
    pub fn new(registry: Registry, options: EngineOptions) -> Self {
        Self { registry, options }
    }

    /// Built-in procedures with default options.
    pub fn with_defaults() -> Self {
        Self::new(Registry::with_builtin_procedures(), EngineOptions::default())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Solve one task. Never panics: every outcome is a `SolutionCore`.
    pub fn dispatch(&self, task: &TaskDescriptor) -> SolutionCore {
        let key = task.key();
        tracing::debug!(target: "dispatch", task_id = %task.id, key = %key, "dispatch");

        let Some(procedure) = self.registry.lookup(&key) else {
            tracing::warn!(target: "dispatch", task_id = %task.id, key = %key, "unknown_pattern");
            return assemble_failure(
                &task.id,
                Failure {
                    kind: FailureKind::UnknownPattern,
                    message: format!("{}: {}", UNKNOWN_PATTERN_MESSAGE, key),
                    detail: None,
                },
            );
        };

        let ctx = ProcedureContext {
            alias_policy: self.options.alias_policy,
        };
        let result = catch_unwind(AssertUnwindSafe(|| procedure.solve(task, &ctx)));

        match result {
            Ok(Ok(output)) => {
                tracing::debug!(
                    target: "dispatch",
                    task_id = %task.id,
                    procedure = procedure.name(),
                    steps = output.steps.len(),
                    "solved"
                );
                assemble_success(task, output, &self.options)
            }
            Ok(Err(err)) => {
                tracing::info!(
                    target: "dispatch",
                    task_id = %task.id,
                    procedure = procedure.name(),
                    error = %err,
                    "procedure_failed"
                );
                assemble_failure(&task.id, failure_from_error(&err))
            }
            Err(payload) => {
                let panic_msg = panic_message(payload.as_ref());
                tracing::error!(
                    target: "dispatch",
                    task_id = %task.id,
                    procedure = procedure.name(),
                    panic = %panic_msg,
                    "procedure_crashed"
                );
                assemble_failure(
                    &task.id,
                    Failure {
                        kind: FailureKind::ProcedureCrashed,
                        message: CRASH_MESSAGE.to_string(),
                        detail: Some(panic_msg),
                    },
                )
            }
        }
    }

    /// Solve independent tasks on scoped worker threads; output order
    /// matches input order.
    pub fn dispatch_batch(&self, tasks: &[TaskDescriptor]) -> Vec<SolutionCore> {
        let workers = self.options.workers_for(tasks.len());
        if workers <= 1 {
            return tasks.iter().map(|t| self.dispatch(t)).collect();
        }

        let chunk_size = tasks.len().div_ceil(workers);
        tracing::debug!(target: "dispatch", tasks = tasks.len(), workers, chunk_size, "batch");

        std::thread::scope(|scope| {
            let handles: Vec<_> = tasks
                .chunks(chunk_size)
                .map(|chunk| {
                    let handle = scope.spawn(move || {
                        chunk.iter().map(|t| self.dispatch(t)).collect::<Vec<_>>()
                    });
                    (chunk, handle)
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|(chunk, handle)| match handle.join() {
                    Ok(cores) => cores,
                    Err(_) => {
                        tracing::error!(target: "dispatch", chunk = chunk.len(), "worker_join_failed");
                        chunk.iter().map(|t| self.dispatch(t)).collect()
                    }
                })
                .collect()
        })
    }
}
