//! The polling loop: fetch, detect changes, notify

use std::time::Duration;

use chrono::Utc;
use compact_str::format_compact;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    client::HomeworkApi,
    domain::ReviewStatus,
    notifier::TelegramNotifier,
    response,
    result::{ErrorKind, Result, WatchError},
};

/// Default pause between poll cycles, in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 600;

/// What to do when the API returns a structurally invalid response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Report once, keep polling
    #[default]
    Continue,
    /// Report, then stop the loop
    Halt,
}

/// Watcher behavior knobs
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Pause between poll cycles
    pub interval: Duration,
    /// Reaction to structurally invalid responses
    pub malformed_policy: MalformedPolicy,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            malformed_policy: MalformedPolicy::default(),
        }
    }
}

/// Everything the loop remembers between cycles
///
/// Nothing here survives a restart; a fresh process re-announces the current
/// status once.
#[derive(Debug, Clone)]
pub struct PollState {
    last_notified_status: Option<ReviewStatus>,
    last_notified_error: Option<ErrorKind>,
    cursor: i64,
}

impl PollState {
    fn new(cursor: i64) -> Self {
        Self {
            last_notified_status: None,
            last_notified_error: None,
            cursor,
        }
    }
}

#[allow(dead_code)]
impl PollState {
    /// Status most recently announced to the user
    pub fn last_notified_status(&self) -> Option<ReviewStatus> {
        self.last_notified_status
    }

    /// Error kind most recently announced to the user
    pub fn last_notified_error(&self) -> Option<ErrorKind> {
        self.last_notified_error
    }

    /// `from_date` bound used by the next fetch
    pub fn cursor(&self) -> i64 {
        self.cursor
    }
}

/// Polls the homework API and announces review status changes
#[derive(Debug)]
pub struct ReviewWatcher {
    api: HomeworkApi,
    notifier: TelegramNotifier,
    config: WatcherConfig,
    state: PollState,
}

impl ReviewWatcher {
    pub fn new(api: HomeworkApi, notifier: TelegramNotifier, config: WatcherConfig) -> Self {
        let state = PollState::new(Utc::now().timestamp());
        Self { api, notifier, config, state }
    }

    /// Poll forever at the configured interval
    ///
    /// Returns only when `MalformedPolicy::Halt` fires.
    pub async fn run(mut self) -> Result<()> {
        info!(
            interval = ?self.config.interval,
            cursor = self.state.cursor,
            "Starting review watcher"
        );

        loop {
            self.poll_once().await?;
            sleep(self.config.interval).await;
        }
    }

    /// Run one fetch/validate/notify cycle
    ///
    /// Recoverable failures are reported through the dedup path and produce
    /// `Ok`; an error comes back only when the halt policy fires.
    #[instrument(skip(self), fields(cursor = self.state.cursor))]
    pub async fn poll_once(&mut self) -> Result<()> {
        match self.check_for_update().await {
            Ok(()) => Ok(()),
            Err(error) => self.report_failure(error).await,
        }
    }

    /// Current loop state
    #[allow(dead_code)]
    pub fn state(&self) -> &PollState {
        &self.state
    }

    async fn check_for_update(&mut self) -> Result<()> {
        let response = self.api.homework_statuses(self.state.cursor).await?;
        let validated = response::validate(&response)?;

        let Some(homework) = validated.homework else {
            return Ok(());
        };

        let update = homework.review_update()?;
        if self.state.last_notified_status == Some(update.status) {
            debug!(status = %update.status, "Status unchanged, suppressing notification");
            return Ok(());
        }

        self.notifier.send(&update.message).await?;
        info!(status = %update.status, "Announced review status change");

        self.state.last_notified_status = Some(update.status);
        if let Some(current_date) = validated.current_date {
            self.state.cursor = current_date;
        }

        Ok(())
    }

    /// Announce a cycle failure, at most once per error kind
    async fn report_failure(&mut self, error: WatchError) -> Result<()> {
        let kind = error.kind();
        error!(error = %error, %kind, "Poll cycle failed");

        if self.state.last_notified_error == Some(kind) {
            debug!(%kind, "Error kind already announced, suppressing notification");
        } else {
            let alert = format_compact!("Сбой в работе программы: {kind}");
            match self.notifier.send(&alert).await {
                Ok(()) => self.state.last_notified_error = Some(kind),
                // an undeliverable alert must never take the loop down
                Err(delivery) => warn!(error = %delivery, "Failed to deliver the error alert"),
            }
        }

        if kind == ErrorKind::MalformedResponse
            && self.config.malformed_policy == MalformedPolicy::Halt
        {
            return Err(error);
        }

        Ok(())
    }
}
