//! Pipeline orchestrator for Vidseek.
//!
//! Coordinates the whole process from snippet to timestamped URL:
//! discovery, transcript acquisition, semantic matching and URL building.

use crate::config::Settings;
use crate::discovery::{DiscoveredVideo, SerperSearcher, VideoDiscovery};
use crate::embedding::{create_embedder, Embedder};
use crate::error::Result;
use crate::matcher::{MatchResult, SegmentMatcher};
use crate::timestamp;
use crate::transcript::{TranscriptSource, TranscriptStore, YtDlpTranscriptSource};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the Vidseek pipeline.
pub struct Orchestrator {
    settings: Settings,
    discovery: Option<Arc<dyn VideoDiscovery>>,
    transcript_source: Arc<dyn TranscriptSource>,
    matcher: SegmentMatcher,
}

impl Orchestrator {
    /// Create a new orchestrator with default components.
    ///
    /// Discovery is only wired up when a Serper API key is available;
    /// commands that start from a known video ID work without it.
    pub fn new(settings: Settings) -> Result<Self> {
        let embedder = create_embedder(&settings)?;

        let discovery: Option<Arc<dyn VideoDiscovery>> = match settings.serper_api_key() {
            Some(key) => Some(Arc::new(SerperSearcher::new(&settings.search, Some(key))?)),
            None => None,
        };

        let transcript_source = Arc::new(YtDlpTranscriptSource::from_settings(&settings.youtube));

        Ok(Self::with_components(
            settings,
            discovery,
            transcript_source,
            embedder,
        ))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        discovery: Option<Arc<dyn VideoDiscovery>>,
        transcript_source: Arc<dyn TranscriptSource>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        let transcripts = TranscriptStore::new(settings.transcript_dir());
        let matcher = SegmentMatcher::new(embedder, transcripts);

        Self {
            settings,
            discovery,
            transcript_source,
            matcher,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the transcript store.
    pub fn transcripts(&self) -> &TranscriptStore {
        self.matcher.transcripts()
    }

    /// Find the earliest-published video containing `snippet`.
    pub async fn discover(&self, snippet: &str) -> Result<DiscoveredVideo> {
        let discovery = self.discovery.as_ref().ok_or_else(|| {
            crate::error::VidseekError::Config(
                "Video discovery needs a Serper API key. Set SERPER_API_KEY or [search] api_key."
                    .to_string(),
            )
        })?;
        discovery.find_earliest(snippet).await
    }

    /// Make sure a transcript artifact exists for `video_id`, fetching it if needed.
    #[instrument(skip(self))]
    pub async fn ensure_transcript(&self, video_id: &str, force: bool) -> Result<TranscriptStatus> {
        let transcripts = self.transcripts();

        if !force && transcripts.exists(video_id)? {
            info!("Using stored transcript for {}", video_id);
            return Ok(TranscriptStatus {
                path: transcripts.path_for(video_id)?,
                segments: transcripts.load(video_id)?.len(),
                fetched: false,
            });
        }

        let segments = self.transcript_source.fetch(video_id).await?;
        info!("Fetched {} transcript segments for {}", segments.len(), video_id);
        let path = transcripts.save(video_id, &segments)?;

        Ok(TranscriptStatus {
            path,
            segments: segments.len(),
            fetched: true,
        })
    }

    /// Match `query` against the stored transcript of `video_id`.
    pub async fn match_video(&self, video_id: &str, query: &str) -> Result<MatchResult> {
        self.matcher.match_query(video_id, query).await
    }

    /// Build the playback URL for a match.
    pub fn playback_url(&self, matched: &MatchResult) -> Result<String> {
        timestamp::playback_url(
            &self.settings.youtube.watch_url,
            &matched.video_id,
            &matched.timestamp_start,
        )
    }

    /// Run the full pipeline: discover, fetch transcript, match, build URL.
    #[instrument(skip(self))]
    pub async fn locate(&self, snippet: &str, force: bool) -> Result<LocateResult> {
        let video = self.discover(snippet).await?;
        self.ensure_transcript(&video.id, force).await?;
        let matched = self.match_video(&video.id, snippet).await?;
        let url = self.playback_url(&matched)?;

        Ok(LocateResult {
            video,
            matched,
            url,
        })
    }
}

/// Outcome of [`Orchestrator::ensure_transcript`].
#[derive(Debug, Clone)]
pub struct TranscriptStatus {
    /// Location of the artifact.
    pub path: PathBuf,
    /// Number of segments in it.
    pub segments: usize,
    /// Whether it was downloaded during this call.
    pub fetched: bool,
}

/// Result of locating a snippet.
#[derive(Debug, Clone, Serialize)]
pub struct LocateResult {
    pub video: DiscoveredVideo,
    pub matched: MatchResult,
    pub url: String,
}
