use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    /// Connection configuration could not be retrieved or applied; the
    /// repository is unusable until a reconnect succeeds.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The relay endpoint reported that no webhook is configured. Kept
    /// distinct so the UI can name the missing configuration instead of
    /// showing a generic failure.
    #[error("No webhook configured")]
    WebhookNotConfigured,

    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success response from the remote store or the relay.
    #[error("Store error ({status}): {message}")]
    Store { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RepositoryError::Deserialization(err.to_string());
        }
        match err.status() {
            Some(status) => RepositoryError::Store {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => RepositoryError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Deserialization(err.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(err.to_string())
    }
}
