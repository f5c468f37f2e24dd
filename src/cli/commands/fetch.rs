//! Fetch command implementation.

use super::resolve_video_id;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the fetch command.
pub async fn run_fetch(video: &str, force: bool, settings: Settings) -> Result<()> {
    let video_id = resolve_video_id(video)?;
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video_id));
    let status = orchestrator.ensure_transcript(&video_id, force).await;
    spinner.finish_and_clear();

    match status {
        Ok(status) => {
            if status.fetched {
                Output::success(&format!("Saved {} segments", status.segments));
            } else {
                Output::info(&format!(
                    "Transcript already stored ({} segments). Use --force to re-download.",
                    status.segments
                ));
            }
            Output::kv("Path", &status.path.display().to_string());
        }
        Err(e) => {
            Output::error(&format!("Failed to fetch transcript: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
