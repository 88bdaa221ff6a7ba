//! Configuration for the homework API client

use std::time::Duration;

use compact_str::CompactString;

use super::error::{ClientError, Result};

/// Production endpoint answering homework status queries
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Main configuration for the homework status client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the homework status endpoint
    pub endpoint: CompactString,
    /// OAuth token for the homework service
    pub api_token: CompactString,
    /// Request configuration
    pub request: RequestConfig,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30) }
    }
}

impl ClientConfig {
    /// Create a new client configuration against the production endpoint
    pub fn new(api_token: impl Into<CompactString>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_token: api_token.into(),
            request: RequestConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(ClientError::config_validation(
                "endpoint",
                "Endpoint URL cannot be empty",
            ));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ClientError::config_validation(
                "endpoint",
                "Endpoint URL must start with http:// or https://",
            ));
        }

        if url::Url::parse(&self.endpoint).is_err() {
            return Err(ClientError::config_validation(
                "endpoint",
                "Endpoint URL is not a valid URL format",
            ));
        }

        if self.api_token.is_empty() {
            return Err(ClientError::config_validation(
                "api_token",
                "API token cannot be empty",
            ));
        }

        if self.request.timeout.is_zero() {
            return Err(ClientError::config_validation(
                "timeout",
                "Timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}

#[allow(dead_code)]
impl ClientConfig {
    /// Set the endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<CompactString>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }
}
