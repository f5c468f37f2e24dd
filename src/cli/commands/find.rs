//! Find command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the find command: snippet in, timestamped link out.
pub async fn run_find(snippet: &str, force: bool, json: bool, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Searching for the earliest video...");
    let video = orchestrator.discover(snippet).await;
    spinner.finish_and_clear();

    let video = match video {
        Ok(video) => video,
        Err(e) => {
            Output::error(&format!("Video search failed: {}", e));
            return Err(e.into());
        }
    };

    if !json {
        Output::success("Found video");
        Output::video_info(&video);
    }

    let spinner = Output::spinner("Fetching transcript...");
    let status = orchestrator.ensure_transcript(&video.id, force).await;
    spinner.finish_and_clear();

    if let Err(e) = status {
        Output::error(&format!("Transcript unavailable: {}", e));
        return Err(e.into());
    }

    let spinner = Output::spinner("Matching snippet against transcript...");
    let matched = orchestrator.match_video(&video.id, snippet).await;
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
        let result = crate::orchestrator::LocateResult {
            video,
            matched,
            url,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        Output::match_panel(&matched, &url);
    }

    Ok(())
}
