use thiserror::Error;
use tutor_api_models::PatternKey;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("pattern {key} is already registered")]
    DuplicatePattern { key: PatternKey },
}
