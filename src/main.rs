use anyhow::{Context, Result};
use clap::Parser;
use opportunity_finder::app_log;
use opportunity_finder::cli::{handle_command, Cli};
use opportunity_finder::ConfigManager;
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigManager::load()?;

    // Logs go to a file so stdout stays clean for listings
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.logging.log_file)
        .with_context(|| {
            format!(
                "Failed to open log file {}",
                config.logging.log_file.display()
            )
        })?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    app_log!(info, "Environment: {}", config.environment);
    app_log!(info, "GitHub API: {}", config.sources.github_api_url);
    app_log!(
        info,
        "Listings backend: {}",
        config.sources.backend_url.as_deref().unwrap_or("not configured")
    );
    app_log!(info, "Inference endpoint: {}", config.inference.endpoint());

    handle_command(cli, config).await
}
