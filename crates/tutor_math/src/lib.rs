//! Exact math kernels used by the solving procedures.
//!
//! Everything here works on `BigRational` so results never drift, and every
//! kernel that a learner sees also produces its own derivation trail.

pub mod arith;
pub mod curve;
pub mod error;
pub mod expr;
pub mod numeric;
pub mod sign_chart;
pub mod solution_set;

pub use arith::{evaluate, evaluate_with_steps, ArithStep, Evaluation, Notation};
pub use curve::{classify_formula, parse_curve, Curve, CurveKind};
pub use error::MathError;
pub use expr::{ExprNode, Leaf, OpKind, OpNode};
pub use numeric::{quadratic_roots, QuadraticRoots};
pub use sign_chart::{RationalFunction, Relation, Roots, SignRegion};
pub use solution_set::{Bound, Interval, SolutionSet};
