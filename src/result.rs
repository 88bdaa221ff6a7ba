use std::fmt;

use compact_str::CompactString;
use thiserror::Error;

use crate::{client::ClientError, notifier::DeliveryError};

pub type Result<T> = std::result::Result<T, WatchError>;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Configuration is incomplete, missing: {missing}")]
    ConfigurationMissing { missing: CompactString },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Malformed status response: {reason}")]
    MalformedResponse { reason: CompactString },

    #[error("Homework record rejected: {reason}")]
    UnknownStatus { reason: CompactString },

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Coarse error identity used to deduplicate error notifications
///
/// Two failures of the same kind produce one notification, whatever their
/// per-instance detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigurationMissing,
    EndpointUnavailable,
    EndpointUnreachable,
    MalformedResponse,
    UnknownStatus,
    DeliveryFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "ConfigurationMissing",
            Self::EndpointUnavailable => "EndpointUnavailable",
            Self::EndpointUnreachable => "EndpointUnreachable",
            Self::MalformedResponse => "MalformedResponse",
            Self::UnknownStatus => "UnknownStatus",
            Self::DeliveryFailed => "DeliveryFailed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WatchError {
    /// Create a configuration-missing error
    pub fn configuration_missing(missing: impl Into<CompactString>) -> Self {
        Self::ConfigurationMissing { missing: missing.into() }
    }

    /// Create a malformed-response error
    pub fn malformed_response(reason: impl Into<CompactString>) -> Self {
        Self::MalformedResponse { reason: reason.into() }
    }

    /// Create an unknown-status error
    pub fn unknown_status(reason: impl Into<CompactString>) -> Self {
        Self::UnknownStatus { reason: reason.into() }
    }

    /// Coarse identity of this error for the notification dedup path
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigurationMissing { .. } => ErrorKind::ConfigurationMissing,
            Self::Client(ClientError::EndpointUnavailable { .. }) => ErrorKind::EndpointUnavailable,
            Self::Client(ClientError::EndpointUnreachable { .. } | ClientError::Http(_)) => {
                ErrorKind::EndpointUnreachable
            },
            Self::Client(ClientError::JsonParse { .. }) => ErrorKind::MalformedResponse,
            Self::Client(ClientError::ConfigValidation { .. }) => ErrorKind::ConfigurationMissing,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::UnknownStatus { .. } => ErrorKind::UnknownStatus,
            Self::Delivery(_) => ErrorKind::DeliveryFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_onto_the_taxonomy() {
        let unavailable = WatchError::from(ClientError::EndpointUnavailable {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        });
        assert_eq!(unavailable.kind(), ErrorKind::EndpointUnavailable);

        let json_parse = WatchError::from(ClientError::JsonParse {
            source: serde_json::from_str::<serde_json::Value>("nope").unwrap_err(),
        });
        assert_eq!(json_parse.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn kind_names_match_the_taxonomy() {
        assert_eq!(ErrorKind::DeliveryFailed.to_string(), "DeliveryFailed");
        assert_eq!(
            WatchError::unknown_status("whatever").kind().as_str(),
            "UnknownStatus"
        );
    }
}
