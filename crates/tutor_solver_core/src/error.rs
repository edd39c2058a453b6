use thiserror::Error;
use tutor_math::MathError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("не задан обязательный параметр '{name}'")]
    MissingParameter { name: String },
    #[error("некорректный параметр '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("деление на ноль: {context}")]
    DivisionByZero { context: String },
    #[error("операция не определена: {reason}")]
    UndefinedOperation { reason: String },
    #[error(transparent)]
    Math(#[from] MathError),
}

impl SolveError {
    pub fn missing(name: impl Into<String>) -> Self {
        SolveError::MissingParameter { name: name.into() }
    }

    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SolveError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn division_by_zero(context: impl Into<String>) -> Self {
        SolveError::DivisionByZero {
            context: context.into(),
        }
    }

    pub fn undefined(reason: impl Into<String>) -> Self {
        SolveError::UndefinedOperation {
            reason: reason.into(),
        }
    }
}
