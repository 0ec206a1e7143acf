use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur while recording or reading sales.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaleError {
    #[error("Sale not found: {0}")]
    NotFound(String),
    #[error("Sale {0} is immutable")]
    Immutable(u64),
    #[error("Sale validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<SaleError>> for SaleError {
    fn from(err: FrameworkError<SaleError>) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => SaleError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => SaleError::ActorCommunicationError(other.to_string()),
        }
    }
}
