//! HTTP client for the homework review API

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
};

/// Pure HTTP client for the homework status endpoint
#[derive(Debug)]
pub struct HomeworkApi {
    client: Client,
    config: ClientConfig,
}

impl HomeworkApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request.timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    /// Fetch homework statuses changed since `from_date`
    ///
    /// Returns the body as raw JSON; shape checking is the caller's concern.
    #[instrument(skip(self), fields(from_date = from_date))]
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value> {
        let response = self
            .authenticated_request()
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|source| {
                error!(
                    endpoint = %self.config.endpoint,
                    error = %source,
                    "Homework endpoint is unreachable"
                );
                ClientError::EndpointUnreachable { source }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                endpoint = %self.config.endpoint,
                %status,
                "Homework endpoint returned an error status"
            );
            return Err(ClientError::EndpointUnavailable { status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ClientError::EndpointUnreachable { source })?;

        let parsed = serde_json::from_str(&body).map_err(|source| {
            debug!(body = %body, "Homework endpoint returned a body that is not JSON");
            ClientError::JsonParse { source }
        })?;

        debug!("Successfully fetched homework statuses");
        Ok(parsed)
    }

    /// Create authenticated request builder
    fn authenticated_request(&self) -> RequestBuilder {
        self.client
            .get(self.config.endpoint.as_str())
            .header("Authorization", format!("OAuth {}", self.config.api_token))
    }
}
