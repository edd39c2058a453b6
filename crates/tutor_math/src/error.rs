use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("деление на ноль: {context}")]
    DivisionByZero { context: String },
    #[error("операция не определена: {reason}")]
    Undefined { reason: String },
    #[error("некорректное выражение: {reason}")]
    Malformed { reason: String },
    #[error("некорректное число '{text}'")]
    InvalidNumber { text: String },
    #[error("формула '{formula}' не поддерживается: {reason}")]
    UnsupportedFormula { formula: String, reason: String },
}

impl MathError {
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        MathError::DivisionByZero {
            context: context.into(),
        }
    }

    pub fn undefined(reason: impl Into<String>) -> Self {
        MathError::Undefined {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        MathError::Malformed {
            reason: reason.into(),
        }
    }
}
