//! Use-case error type.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::ProviderError;

/// Everything an assessment use case can fail with.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Blueprint '{0}' not found")]
    BlueprintNotFound(String),

    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    #[error("Question '{0}' not found in session")]
    QuestionNotFound(String),

    #[error("A response for question '{0}' was already recorded")]
    DuplicateResponse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
