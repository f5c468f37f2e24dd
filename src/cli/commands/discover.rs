//! Discover command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the discover command.
pub async fn run_discover(snippet: &str, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Searching...");
    let video = orchestrator.discover(snippet).await;
    spinner.finish_and_clear();

    match video {
        Ok(video) => {
            Output::header("Earliest Video");
            Output::video_info(&video);
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
