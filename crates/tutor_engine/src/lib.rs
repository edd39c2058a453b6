//! Dispatch layer of the tutoring solver.
//!
//! A [`Router`] looks a [`TaskDescriptor`](tutor_api_models::TaskDescriptor)
//! up in its [`Registry`] by exact pattern key, runs the procedure behind a
//! panic fence and assembles the canonical
//! [`SolutionCore`](tutor_api_models::SolutionCore). Every outcome, including
//! unknown patterns and crashed procedures, comes back in that one shape.
//!
//! ```ignore
//! let router = Router::with_defaults();
//! let core = router.dispatch(&task);
//! assert_eq!(verify(&task, &core), Verdict::Match);
//! ```

pub mod assembler;
pub mod error;
pub mod options;
pub mod registry;
pub mod router;
pub mod verify;

pub use assembler::{assemble_failure, assemble_success, failure_from_error, failure_kind};
pub use error::EngineError;
pub use options::EngineOptions;
pub use registry::Registry;
pub use router::Router;
pub use verify::{answers_match, verify, Verdict};
