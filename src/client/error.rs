//! Error types for the homework API client

use compact_str::CompactString;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures produced while talking to the homework API
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Http(reqwest::Error),

    #[error("Homework endpoint returned HTTP {status}")]
    EndpointUnavailable { status: reqwest::StatusCode },

    #[error("Failed to reach homework endpoint: {source}")]
    EndpointUnreachable { source: reqwest::Error },

    #[error("Homework endpoint returned invalid JSON: {source}")]
    JsonParse { source: serde_json::Error },

    #[error("Invalid client configuration: {field}: {message}")]
    ConfigValidation {
        field: CompactString,
        message: CompactString,
    },
}

impl ClientError {
    /// Create a configuration validation error
    pub fn config_validation(
        field: impl Into<CompactString>,
        message: impl Into<CompactString>,
    ) -> Self {
        Self::ConfigValidation { field: field.into(), message: message.into() }
    }
}
