//! Transcript acquisition and storage.
//!
//! Transcripts are fetched once per video (captions via yt-dlp) and persisted
//! as a JSON artifact keyed by video id. The matcher only ever reads that
//! artifact back through [`TranscriptStore`].

mod models;
mod store;
mod youtube;

pub use models::{validate_video_id, TranscriptSegment};
pub use store::TranscriptStore;
pub use youtube::{parse_json3, YtDlpTranscriptSource};

use crate::error::Result;
use async_trait::async_trait;

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the ordered transcript segments for a video.
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;
}
