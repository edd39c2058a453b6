//! Display formatting for solution records.
//!
//! Pure string utilities with no solver knowledge:
//! - [`format_text`]: idempotent normaliser (decimal comma, `−`, superscripts, `·`)
//! - [`format_rational`]: exact values as decimals or fractions
//! - [`polynomial_formula`]: formula text with sign/one/zero conventions
//! - [`format_intervals`] / [`format_answer`]: final-answer rendering
//!
//! Machine text (ASCII `-`, `.`, `^`, `*`) is what procedures produce; display
//! text is what this crate turns it into.

pub mod answer;
pub mod formula;
pub mod glyphs;
pub mod interval;
pub mod number;
pub mod text;

pub use answer::format_answer;
pub use formula::{linear_factor, polynomial_formula, Coefficient, Term};
pub use glyphs::{superscript, EMPTY_SET, INFINITY, MIDDLE_DOT, MINUS, UNION};
pub use interval::format_intervals;
pub use number::{canonical_rational, decimal_expansion, format_rational, machine_number, parse_rational};
pub use text::format_text;
