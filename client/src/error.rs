//! Error handling for the plant pairing client
//!
//! Business rejections from the scoring service are not errors here; they
//! travel as `PredictionOutcome::Rejected`. `ClientError` covers transport,
//! storage and local misuse.

use thiserror::Error;

/// Message shown on the error card for any transport failure
pub const CONNECTION_FAILED_MESSAGE: &str = "Failed to connect to the backend.";

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Transport errors
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned HTTP {status}")]
    Http { status: u16 },

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Local errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A calculation is already in progress")]
    CalculationInFlight,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Whether the failure happened between us and the service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::Http { .. } | ClientError::InvalidResponse(_)
        )
    }

    /// Text suitable for the error card
    pub fn user_message(&self) -> String {
        if self.is_transport() {
            CONNECTION_FAILED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

impl From<shared::SubmissionError> for ClientError {
    fn from(error: shared::SubmissionError) -> Self {
        ClientError::Validation(error.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        ClientError::Storage(error.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
