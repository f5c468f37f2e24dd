//! Match command implementation.

use super::resolve_video_id;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use serde_json::json;

/// Run the match command against a known video.
pub async fn run_match(
    video: &str,
    query: &str,
    force: bool,
    json: bool,
    settings: Settings,
) -> Result<()> {
    let video_id = resolve_video_id(video)?;
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let status = orchestrator.ensure_transcript(&video_id, force).await;
    spinner.finish_and_clear();

    if let Err(e) = status {
        Output::error(&format!("Transcript unavailable: {}", e));
        return Err(e.into());
    }

    let spinner = Output::spinner("Matching query against transcript...");
    let matched = orchestrator.match_video(&video_id, query).await;
    spinner.finish_and_clear();

    let matched = match matched {
        Ok(matched) => matched,
        Err(e) => {
            Output::error(&format!("Matching failed: {}", e));
            return Err(e.into());
        }
    };

    let url = orchestrator.playback_url(&matched)?;

    if json {
        let output = json!({ "matched": matched, "url": url });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        Output::match_panel(&matched, &url);
    }

    Ok(())
}
