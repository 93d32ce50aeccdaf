use shared::{token::MalformedTokenError, validation::ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid user id: {0}")]
    Validation(#[from] ValidationError),
    #[error("malformed recommendation token: {0}")]
    MalformedToken(#[from] MalformedTokenError),
    #[error("recommendation service request failed: {0}")]
    Network(String),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("local storage failed: {0:#}")]
    Storage(#[source] anyhow::Error),
    #[error("no user is logged in")]
    NotLoggedIn,
    #[error("a {0} request is already in flight")]
    Busy(&'static str),
}

impl ClientError {
    /// Failures the user can retry from the same screen.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::MalformedToken(_) | ClientError::Storage(_)
        )
    }
}
