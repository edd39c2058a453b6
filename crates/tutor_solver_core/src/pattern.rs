//! Closed set of solvable patterns.

use crate::arithmetic::{ArithmeticFamily, ArithmeticProcedure};
use crate::function_matching::FunctionMatchingProcedure;
use crate::procedure::Procedure;
use crate::rational_inequality::{InequalityForm, RationalInequalityProcedure};
use crate::sign_matching::{CurveFamily, SignMatchingProcedure};
use std::sync::Arc;
use tutor_api_models::PatternKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternId {
    FractionExpression,
    DecimalExpression,
    PowerOfTenExpression,
    FormulaToGraph,
    QuadraticSigns,
    LinearSigns,
    UnitFractionCompare,
    ConstOverQuadratic,
    XVsConstOverX,
    ShiftedSquare,
}

impl PatternId {
    pub const ALL: [PatternId; 10] = [
        PatternId::FractionExpression,
        PatternId::DecimalExpression,
        PatternId::PowerOfTenExpression,
        PatternId::FormulaToGraph,
        PatternId::QuadraticSigns,
        PatternId::LinearSigns,
        PatternId::UnitFractionCompare,
        PatternId::ConstOverQuadratic,
        PatternId::XVsConstOverX,
        PatternId::ShiftedSquare,
    ];

    /// `(task_type, subtype, pattern)` parts.
    pub fn parts(self) -> (u32, &'static str, &'static str) {
        match self {
            PatternId::FractionExpression => (6, "fractions", "fraction_expression"),
            PatternId::DecimalExpression => (6, "decimals", "decimal_expression"),
            PatternId::PowerOfTenExpression => (6, "powers", "power_of_ten_expression"),
            PatternId::FormulaToGraph => (11, "function_matching", "formula_to_graph"),
            PatternId::QuadraticSigns => (11, "sign_matching", "quadratic_signs"),
            PatternId::LinearSigns => (11, "sign_matching", "linear_signs"),
            PatternId::UnitFractionCompare => (13, "rational_inequalities", "unit_fraction_compare"),
            PatternId::ConstOverQuadratic => (13, "rational_inequalities", "const_over_quadratic"),
            PatternId::XVsConstOverX => (13, "rational_inequalities", "x_vs_const_over_x"),
            PatternId::ShiftedSquare => (13, "rational_inequalities", "shifted_square"),
        }
    }

    pub fn key(self) -> PatternKey {
        let (task_type, subtype, pattern) = self.parts();
        PatternKey::new(task_type, subtype, pattern)
    }

    pub fn from_key(key: &PatternKey) -> Option<Self> {
        Self::ALL.into_iter().find(|id| {
            let (task_type, subtype, pattern) = id.parts();
            key.task_type == task_type && key.subtype == subtype && key.pattern == pattern
        })
    }

    /// The built-in procedure solving this pattern.
    pub fn procedure(self) -> Arc<dyn Procedure> {
        match self {
            PatternId::FractionExpression => {
                Arc::new(ArithmeticProcedure::new(ArithmeticFamily::Fractions))
            }
            PatternId::DecimalExpression => {
                Arc::new(ArithmeticProcedure::new(ArithmeticFamily::Decimals))
            }
            PatternId::PowerOfTenExpression => {
                Arc::new(ArithmeticProcedure::new(ArithmeticFamily::PowersOfTen))
            }
            PatternId::FormulaToGraph => Arc::new(FunctionMatchingProcedure),
            PatternId::QuadraticSigns => Arc::new(SignMatchingProcedure::new(CurveFamily::Quadratic)),
            PatternId::LinearSigns => Arc::new(SignMatchingProcedure::new(CurveFamily::Linear)),
            PatternId::UnitFractionCompare => {
                Arc::new(RationalInequalityProcedure::new(InequalityForm::UnitFractionCompare))
            }
            PatternId::ConstOverQuadratic => {
                Arc::new(RationalInequalityProcedure::new(InequalityForm::ConstOverQuadratic))
            }
            PatternId::XVsConstOverX => {
                Arc::new(RationalInequalityProcedure::new(InequalityForm::XVsConstOverX))
            }
            PatternId::ShiftedSquare => {
                Arc::new(RationalInequalityProcedure::new(InequalityForm::ShiftedSquare))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for id in PatternId::ALL {
            assert_eq!(PatternId::from_key(&id.key()), Some(id));
        }
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<PatternKey> = PatternId::ALL.iter().map(|id| id.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), PatternId::ALL.len());
    }

    #[test]
    fn unknown_key_has_no_pattern() {
        let key = PatternKey::new(13, "rational_inequalities", "does_not_exist");
        assert_eq!(PatternId::from_key(&key), None);
        let wrong_type = PatternKey::new(6, "sign_matching", "linear_signs");
        assert_eq!(PatternId::from_key(&wrong_type), None);
    }
}
