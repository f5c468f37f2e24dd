//! Session-scoped vector store over one video's transcript.
//!
//! A [`VectorStore`] couples a [`VectorIndex`] with the transcript segments
//! it was built from. Position `i` in the index always refers to
//! `metadata[i]`; the fields are private and the only constructor embeds the
//! segments in order, so the alignment cannot be broken from outside.

mod index;

pub use index::{Neighbor, VectorIndex};

use crate::embedding::Embedder;
use crate::error::{Result, VidseekError};
use crate::transcript::TranscriptSegment;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A transcript segment returned by a search, with its distance.
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    /// Index position (and transcript position) of the segment.
    pub position: usize,
    /// The matched segment.
    pub segment: &'a TranscriptSegment,
    /// Euclidean distance to the query (lower is better).
    pub distance: f32,
}

/// Index, metadata and embedder for a single search session.
pub struct VectorStore {
    video_id: String,
    index: VectorIndex,
    metadata: Vec<TranscriptSegment>,
    embedder: Arc<dyn Embedder>,
}

impl VectorStore {
    /// Embed every segment (in order) and index the resulting vectors.
    #[instrument(skip(segments, embedder), fields(count = segments.len()))]
    pub async fn build(
        video_id: &str,
        segments: Vec<TranscriptSegment>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        if segments.is_empty() {
            return Err(VidseekError::EmptyTranscript(format!(
                "transcript for '{}' has no segments",
                video_id
            )));
        }

        let texts: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;
        crate::embedding::ensure_count(segments.len(), &embeddings)?;

        let index = VectorIndex::build(embeddings)?;
        debug!("Indexed {} vectors of dimension {}", index.len(), index.dimension());

        Ok(Self {
            video_id: video_id.to_string(),
            index,
            metadata: segments,
            embedder,
        })
    }

    /// Video the store was built for.
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Number of indexed segments.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Segments in index order.
    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.metadata
    }

    /// Embed `query` and return the `k` closest segments, nearest first.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult<'_>>> {
        let query_vector = self.embedder.embed(query).await?;
        let neighbors = self.index.query(&query_vector, k)?;

        Ok(neighbors
            .into_iter()
            .map(|neighbor| SearchResult {
                position: neighbor.position,
                segment: &self.metadata[neighbor.position],
                distance: neighbor.distance,
            })
            .collect())
    }
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("video_id", &self.video_id)
            .field("segments", &self.metadata.len())
            .field("dimension", &self.index.dimension())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{BrokenEmbedder, KeywordEmbedder};

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new("welcome to the cooking show", 0.0, 4.0),
            TranscriptSegment::new("first we chop the onions", 4.0, 3.0),
            TranscriptSegment::new("then we fry them in butter", 7.0, 5.0),
        ]
    }

    #[tokio::test]
    async fn test_build_and_search() {
        let store = VectorStore::build("vid", segments(), Arc::new(KeywordEmbedder::new()))
            .await
            .unwrap();

        assert_eq!(store.video_id(), "vid");
        assert_eq!(store.len(), 3);

        let results = store.search("fry in butter", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].position, 2);
        assert_eq!(results[0].segment.text, "then we fry them in butter");
        assert!(results[0].distance <= results[1].distance);
    }

    #[tokio::test]
    async fn test_metadata_aligned_with_index() {
        let store = VectorStore::build("vid", segments(), Arc::new(KeywordEmbedder::new()))
            .await
            .unwrap();

        for (position, segment) in segments().iter().enumerate() {
            let results = store.search(&segment.text, 1).await.unwrap();
            assert_eq!(results[0].position, position);
            assert_eq!(results[0].segment, segment);
        }
    }

    #[tokio::test]
    async fn test_empty_segments_rejected_before_embedding() {
        let embedder = Arc::new(KeywordEmbedder::new());
        let err = VectorStore::build("vid", Vec::new(), embedder.clone())
            .await
            .unwrap_err();

        assert!(matches!(err, VidseekError::EmptyTranscript(_)));
        assert_eq!(embedder.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let err = VectorStore::build("vid", segments(), Arc::new(BrokenEmbedder))
            .await
            .unwrap_err();
        assert!(matches!(err, VidseekError::EmbeddingUnavailable(_)));
    }

    #[tokio::test]
    async fn test_k_larger_than_store() {
        let store = VectorStore::build("vid", segments(), Arc::new(KeywordEmbedder::new()))
            .await
            .unwrap();
        assert!(matches!(
            store.search("onions", 4).await,
            Err(VidseekError::InvalidK { k: 4, available: 3 })
        ));
    }
}
