//! Error types for upstream provider calls

use crate::error::AppError;

/// Result type for provider operations
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while querying an upstream provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport failure, including timeouts
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Repository is not of the form `owner/name`
    #[error("Invalid repository name: {0:?}")]
    InvalidRepository(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Upstream {
            provider: "github".to_string(),
            message: err.to_string(),
        }
    }
}
