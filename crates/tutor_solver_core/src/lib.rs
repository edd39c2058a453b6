//! Pattern-specific solving procedures.
//!
//! Each procedure reads a typed input out of the task payload, runs an exact
//! closed-form calculation from `tutor_math`, and returns a raw derivation
//! (machine text) that the engine numbers and formats.

pub mod arithmetic;
pub mod error;
pub mod function_matching;
pub mod narration;
pub mod params;
pub mod pattern;
pub mod procedure;
pub mod rational_inequality;
pub mod sign_matching;

pub use error::SolveError;
pub use params::{AliasPolicy, Field, ParamReader};
pub use pattern::PatternId;
pub use procedure::{Procedure, ProcedureContext, ProcedureOutput, RawStep};
