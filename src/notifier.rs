//! Telegram delivery of watcher notifications

use std::time::Duration;

use compact_str::{CompactString, ToCompactString, format_compact};
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

/// Production Telegram Bot API base URL
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// A failure to deliver a message through the chat channel
///
/// Transport errors and error statuses are deliberately not distinguished;
/// the loop treats every delivery failure the same way.
#[derive(Debug, Error)]
#[error("Telegram delivery failed: {reason}")]
pub struct DeliveryError {
    reason: CompactString,
}

impl DeliveryError {
    fn new(reason: impl Into<CompactString>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Configuration for the Telegram notifier
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Telegram Bot API base URL
    pub api_base: CompactString,
    /// Bot token issued by BotFather
    pub bot_token: CompactString,
    /// Destination chat id
    pub chat_id: CompactString,
    /// Request timeout
    pub timeout: Duration,
}

impl NotifierConfig {
    /// Create a new notifier configuration against the production API
    pub fn new(bot_token: impl Into<CompactString>, chat_id: impl Into<CompactString>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[allow(dead_code)]
impl NotifierConfig {
    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<CompactString>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Sends messages to one fixed Telegram chat
#[derive(Debug)]
pub struct TelegramNotifier {
    client: Client,
    config: NotifierConfig,
}

impl TelegramNotifier {
    pub fn new(config: NotifierConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::new(format_compact!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Deliver one message to the configured chat
    ///
    /// No deduplication happens here; calling twice with the same text sends
    /// it twice.
    #[instrument(skip_all)]
    pub async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base, self.config.bot_token
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({ "chat_id": self.config.chat_id, "text": text }))
            .send()
            .await
            // the request URL embeds the bot token, keep it out of the error
            .map_err(|e| DeliveryError::new(e.without_url().to_compact_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::new(format_compact!(
                "sendMessage returned HTTP {status}"
            )));
        }

        debug!(chat_id = %self.config.chat_id, "Message delivered to Telegram");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn notifier_against(server: &MockServer) -> TelegramNotifier {
        let config = NotifierConfig::new("bot-token", "42").with_api_base(server.uri());
        TelegramNotifier::new(config).unwrap()
    }

    #[tokio::test]
    async fn posts_text_to_the_configured_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/botbot-token/sendMessage"))
            .and(body_json(json!({ "chat_id": "42", "text": "привет" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        notifier_against(&server).send("привет").await.unwrap();
    }

    #[tokio::test]
    async fn error_status_is_a_delivery_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = notifier_against(&server).send("привет").await.unwrap_err();
        assert!(error.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn connection_failure_is_a_delivery_failure() {
        let server = MockServer::start().await;
        let notifier = notifier_against(&server);
        drop(server);

        assert!(notifier.send("привет").await.is_err());
    }
}
