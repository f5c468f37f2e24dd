//! Vidseek CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidseek::cli::{commands, Cli, Commands};
use vidseek::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config_path();
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| settings.log_directive(cli.verbose)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    // Ensure data directories exist
    std::fs::create_dir_all(settings.transcript_dir())?;

    // Execute command
    match &cli.command {
        Commands::Find { snippet, force, json } => {
            commands::run_find(snippet, *force, *json, settings).await?;
        }

        Commands::Match { video, query, force, json } => {
            commands::run_match(video, query, *force, *json, settings).await?;
        }

        Commands::Fetch { video, force } => {
            commands::run_fetch(video, *force, settings).await?;
        }

        Commands::Discover { snippet } => {
            commands::run_discover(snippet, settings).await?;
        }

        Commands::Url { video, timestamp } => {
            commands::run_url(video, timestamp, &settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
