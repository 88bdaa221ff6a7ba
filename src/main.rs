use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tracing::{error, info};

mod client;
mod config;
mod domain;
mod logging;
mod notifier;
mod response;
mod result;
mod watcher;

use crate::{
    client::{ClientConfig, HomeworkApi},
    config::Credentials,
    notifier::{NotifierConfig, TelegramNotifier},
    watcher::{MalformedPolicy, ReviewWatcher, WatcherConfig},
};

/// Watches homework review status and reports changes to Telegram
#[derive(Debug, Parser)]
#[command(name = "revwatch", version, about)]
struct Cli {
    /// Seconds between poll cycles
    #[arg(
        long,
        default_value_t = watcher::DEFAULT_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    interval: u64,

    /// Stop polling when the API returns a structurally invalid response
    #[arg(long)]
    halt_on_malformed: bool,

    /// Directory receiving the rotating log file
    #[arg(long, value_name = "DIR", default_value = "logs")]
    log_dir: PathBuf,

    /// Log to stdout only
    #[arg(long)]
    no_log_file: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_dir = (!cli.no_log_file).then_some(cli.log_dir.as_path());
    let _log_guard = logging::init(log_dir)?;

    info!(version = env!("CARGO_PKG_VERSION"), "revwatch starting up");

    // nothing may touch the network before the credential check passes
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(error) => {
            error!(error = %error, "Cannot start without the required credentials");
            return Err(error.into());
        },
    };

    let api = HomeworkApi::new(ClientConfig::new(credentials.practicum_token))?;
    let notifier = TelegramNotifier::new(NotifierConfig::new(
        credentials.telegram_token,
        credentials.telegram_chat_id,
    ))?;

    let config = WatcherConfig {
        interval: Duration::from_secs(cli.interval),
        malformed_policy: if cli.halt_on_malformed {
            MalformedPolicy::Halt
        } else {
            MalformedPolicy::Continue
        },
    };

    ReviewWatcher::new(api, notifier, config).run().await?;

    Ok(())
}
