//! Data models for transcripts.

use crate::error::{Result, VidseekError};
use serde::{Deserialize, Serialize};

/// A single timed piece of spoken text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Spoken content.
    pub text: String,
    /// Start time in seconds from the beginning of the video.
    pub start: f64,
    /// How long the segment lasts in seconds.
    pub duration: f64,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Check that a video id is safe to use as an artifact file name.
pub fn validate_video_id(video_id: &str) -> Result<()> {
    let valid = !video_id.is_empty()
        && video_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(VidseekError::InvalidInput(format!(
            "'{}' is not a valid video id",
            video_id
        )))
    }
}
