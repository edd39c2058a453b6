//! JSON DTOs shared by the engine, the CLI and the chat-rendering layer.
//!
//! This crate keeps the transport models independent from solver internals:
//! a [`TaskDescriptor`] comes in, a [`SolutionCore`] goes out.

pub mod solution;
pub mod task;

pub use solution::{
    AnswerValue, CalculationStep, Failure, FailureKind, FinalAnswer, IntervalValue, SolutionCore,
    NO_UNIT,
};
pub use task::{PatternKey, TaskDescriptor, TaskRecord};
