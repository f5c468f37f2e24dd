//! Semantic segment matching.
//!
//! Given a video's stored transcript and a free-text query, find the single
//! transcript segment closest to the query in embedding space and report it
//! with display timestamps:
//!
//! 1. load the transcript artifact and reject an empty one,
//! 2. embed every segment in order and index the vectors ([`VectorStore`]),
//! 3. embed the query and take its nearest neighbor (k = 1),
//! 4. resolve the neighbor back to its segment and format start/end.
//!
//! Each step either succeeds or fails with its own error variant; no partial
//! result is ever returned.

use crate::embedding::Embedder;
use crate::error::{Result, VidseekError};
use crate::timestamp;
use crate::transcript::TranscriptStore;
use crate::vector_store::VectorStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// The best-matching segment for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub video_id: String,
    /// Segment start as `H:MM:SS`.
    pub timestamp_start: String,
    /// Segment end (`start + duration`) as `H:MM:SS`.
    pub timestamp_end: String,
    /// Segment text, verbatim.
    pub matched_text: String,
}

/// Matches queries against stored transcripts.
pub struct SegmentMatcher {
    embedder: Arc<dyn Embedder>,
    transcripts: TranscriptStore,
}

impl SegmentMatcher {
    /// Create a matcher using a shared embedder and a transcript store.
    pub fn new(embedder: Arc<dyn Embedder>, transcripts: TranscriptStore) -> Self {
        Self {
            embedder,
            transcripts,
        }
    }

    /// The transcript store this matcher reads from.
    pub fn transcripts(&self) -> &TranscriptStore {
        &self.transcripts
    }

    /// Load the transcript for `video_id` and index it.
    #[instrument(skip(self))]
    pub async fn build_store(&self, video_id: &str) -> Result<VectorStore> {
        let segments = self.transcripts.load(video_id)?;
        if segments.is_empty() {
            return Err(VidseekError::EmptyTranscript(format!(
                "transcript for '{}' has no segments",
                video_id
            )));
        }

        debug!("Embedding {} segments", segments.len());
        VectorStore::build(video_id, segments, self.embedder.clone()).await
    }

    /// Find the segment of `store` that best matches `query`.
    #[instrument(skip(self, store), fields(video_id = %store.video_id()))]
    pub async fn best_match(&self, store: &VectorStore, query: &str) -> Result<MatchResult> {
        let results = store.search(query, 1).await?;
        let best = results.into_iter().next().ok_or_else(|| {
            VidseekError::InvalidK {
                k: 1,
                available: store.len(),
            }
        })?;

        debug!(
            "Best match at position {} (distance {:.4})",
            best.position, best.distance
        );

        let segment = best.segment;
        Ok(MatchResult {
            video_id: store.video_id().to_string(),
            timestamp_start: timestamp::to_display(segment.start),
            timestamp_end: timestamp::to_display(segment.end()),
            matched_text: segment.text.clone(),
        })
    }

    /// Build a store for `video_id` and return the best match for `query`.
    pub async fn match_query(&self, video_id: &str, query: &str) -> Result<MatchResult> {
        let store = self.build_store(video_id).await?;
        self.best_match(&store, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{BrokenEmbedder, KeywordEmbedder};
    use crate::transcript::TranscriptSegment;
    use std::sync::atomic::Ordering;

    fn matcher_with(
        segments: &[TranscriptSegment],
        embedder: Arc<dyn Embedder>,
    ) -> (tempfile::TempDir, SegmentMatcher) {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());
        store.save("vid", segments).unwrap();
        (dir, SegmentMatcher::new(embedder, store))
    }

    fn answer_transcript() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new("intro", 0.0, 5.0),
            TranscriptSegment::new("the answer is forty two", 10.0, 4.0),
        ]
    }

    #[tokio::test]
    async fn test_finds_answer_segment() {
        let (_dir, matcher) = matcher_with(&answer_transcript(), Arc::new(KeywordEmbedder::new()));

        let result = matcher.match_query("vid", "what is the answer").await.unwrap();
        assert_eq!(
            result,
            MatchResult {
                video_id: "vid".to_string(),
                timestamp_start: "0:00:10".to_string(),
                timestamp_end: "0:00:14".to_string(),
                matched_text: "the answer is forty two".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_matched_text_is_verbatim_and_ordered() {
        let segments = vec![
            TranscriptSegment::new("  Hello,   WORLD!  ", 1.7, 0.0),
            TranscriptSegment::new("something else entirely", 3725.9, 12.6),
        ];
        let (_dir, matcher) = matcher_with(&segments, Arc::new(KeywordEmbedder::new()));
        let store = matcher.build_store("vid").await.unwrap();

        for query in ["hello world", "else", "entirely something", "zzz"] {
            let result = matcher.best_match(&store, query).await.unwrap();
            assert!(segments.iter().any(|s| s.text == result.matched_text));
            let start = timestamp::to_seconds(&result.timestamp_start).unwrap();
            let end = timestamp::to_seconds(&result.timestamp_end).unwrap();
            assert!(end >= start);
        }

        let result = matcher.best_match(&store, "hello world").await.unwrap();
        assert_eq!(result.matched_text, "  Hello,   WORLD!  ");
        assert_eq!(result.timestamp_start, "0:00:01");
        assert_eq!(result.timestamp_end, "0:00:01");

        let result = matcher.best_match(&store, "something else").await.unwrap();
        assert_eq!(result.timestamp_start, "1:02:05");
        assert_eq!(result.timestamp_end, "1:02:18");
    }

    #[tokio::test]
    async fn test_repeated_queries_are_identical() {
        let embedder = Arc::new(KeywordEmbedder::new());
        let (_dir, matcher) = matcher_with(&answer_transcript(), embedder.clone());
        let store = matcher.build_store("vid").await.unwrap();

        let first = matcher.best_match(&store, "what is the answer").await.unwrap();
        let second = matcher.best_match(&store, "what is the answer").await.unwrap();
        assert_eq!(first, second);

        // One batch for the segments, one per query.
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_transcript() {
        let (_dir, matcher) = matcher_with(&[], Arc::new(KeywordEmbedder::new()));
        let err = matcher.match_query("vid", "anything").await.unwrap_err();
        assert!(matches!(err, VidseekError::EmptyTranscript(_)));
    }

    #[tokio::test]
    async fn test_missing_transcript() {
        let (_dir, matcher) = matcher_with(&answer_transcript(), Arc::new(KeywordEmbedder::new()));
        let err = matcher.match_query("other", "anything").await.unwrap_err();
        assert!(matches!(err, VidseekError::TranscriptNotFound(_)));
    }

    #[tokio::test]
    async fn test_embedding_unavailable() {
        let (_dir, matcher) = matcher_with(&answer_transcript(), Arc::new(BrokenEmbedder));
        let err = matcher.match_query("vid", "anything").await.unwrap_err();
        assert!(matches!(err, VidseekError::EmbeddingUnavailable(_)));
    }
}
