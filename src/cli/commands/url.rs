//! Url command implementation.

use super::resolve_video_id;
use crate::cli::Output;
use crate::config::Settings;
use crate::timestamp::playback_url;
use anyhow::Result;

/// Run the url command.
pub fn run_url(video: &str, timestamp: &str, settings: &Settings) -> Result<()> {
    let video_id = resolve_video_id(video)?;

    match playback_url(&settings.youtube.watch_url, &video_id, timestamp) {
        Ok(url) => println!("{}", url),
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    }

    Ok(())
}
