use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use jpeg_bot::application::{HandleMentionUseCase, ListenUseCase};
use jpeg_bot::domain::{MastodonPort, StreamingPort};
use jpeg_bot::infrastructure::{
    AppConfig, CliArgs, ConfigLoader, HttpImageDownloader, MastodonClient, StreamingClient,
};

const BANNER: &str = "jpeg-bot is live! Listening for events...";

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let file_layer = match &config.log_path {
        Some(log_path) => {
            if let Some(parent) = log_path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(log_path) = &config.log_path {
        info!(path = %log_path.display(), "Logging initialized");
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let mut config = ConfigLoader::new().load(args.config.as_deref())?;
    config.merge_with_args(&args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = jpeg_bot::VERSION, server = %config.server.base_url(), "Starting {}", jpeg_bot::NAME);

    let server = &config.server;
    let token = server
        .token()
        .ok_or_else(|| eyre!("access token is empty or malformed"))?;
    let timeout = server.request_timeout();

    let mastodon = Arc::new(MastodonClient::new(server.base_url(), token.clone(), timeout)?);
    let downloader = Arc::new(HttpImageDownloader::new(timeout)?);

    match mastodon.verify_credentials().await {
        Ok(account) => info!(account = %account, "Authenticated"),
        Err(e) => warn!(error = %e, "Could not verify credentials"),
    }

    let mut streaming =
        StreamingClient::new(server.base_url(), server.streaming_url.as_deref(), token)?;
    let events = streaming.connect().await?;

    println!("{BANNER}");

    let listener = ListenUseCase::new(HandleMentionUseCase::new(mastodon, downloader));

    tokio::select! {
        summary = listener.run(events) => {
            info!(
                mentions = summary.mentions_handled,
                replies = summary.replies_posted,
                state = %summary.final_state,
                "Event loop finished"
            );
        }
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Interrupt received, shutting down");
        }
    }

    streaming.disconnect();
    Ok(())
}
