use std::env;

use compact_str::CompactString;
use itertools::Itertools;

use crate::result::{Result, WatchError};

/// Environment variable holding the homework service OAuth token
pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the destination chat id
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Credentials the watcher cannot run without
#[derive(Debug, Clone)]
pub struct Credentials {
    pub practicum_token: CompactString,
    pub telegram_token: CompactString,
    pub telegram_chat_id: CompactString,
}

impl Credentials {
    /// Read credentials from the environment, honoring a `.env` file when present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let credentials = Self {
            practicum_token: env::var(PRACTICUM_TOKEN).unwrap_or_default().into(),
            telegram_token: env::var(TELEGRAM_TOKEN).unwrap_or_default().into(),
            telegram_chat_id: env::var(TELEGRAM_CHAT_ID).unwrap_or_default().into(),
        };
        credentials.validate()?;

        Ok(credentials)
    }

    /// Fail with the full list of missing variables
    pub fn validate(&self) -> Result<()> {
        let missing = [
            (PRACTICUM_TOKEN, &self.practicum_token),
            (TELEGRAM_TOKEN, &self.telegram_token),
            (TELEGRAM_CHAT_ID, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect_vec();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(WatchError::configuration_missing(missing.iter().join(", ")))
        }
    }
}
