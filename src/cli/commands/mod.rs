//! CLI command implementations.

mod config;
mod discover;
mod doctor;
mod fetch;
mod find;
mod match_video;
mod url;

pub use config::run_config;
pub use discover::run_discover;
pub use doctor::run_doctor;
pub use fetch::run_fetch;
pub use find::run_find;
pub use match_video::run_match;
pub use url::run_url;

use crate::discovery::extract_video_id;
use crate::transcript::validate_video_id;

/// Accept a YouTube URL or a bare video ID.
pub(crate) fn resolve_video_id(input: &str) -> anyhow::Result<String> {
    let video_id = extract_video_id(input).unwrap_or_else(|| input.trim().to_string());
    validate_video_id(&video_id)?;
    Ok(video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_video_id() {
        assert_eq!(
            resolve_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(resolve_video_id(" shortid ").unwrap(), "shortid");
        assert!(resolve_video_id("https://example.com/a b").is_err());
    }
}
