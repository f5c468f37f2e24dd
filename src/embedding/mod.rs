//! Embedding generation for semantic segment matching.

#[cfg(feature = "local-embeddings")]
mod local;
mod openai;

#[cfg(feature = "local-embeddings")]
pub use local::LocalEmbedder;
pub use openai::OpenAIEmbedder;

use crate::config::{EmbeddingSettings, Settings};
use crate::error::{Result, VidseekError};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| VidseekError::EmbeddingUnavailable("Empty embedding response".to_string()))
    }

    /// Generate embeddings for multiple texts, one per input, in order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Create the embedder selected by `settings.embedding.provider`.
pub fn create_embedder(settings: &Settings) -> Result<Arc<dyn Embedder>> {
    let embedding: &EmbeddingSettings = &settings.embedding;

    match embedding.provider.to_lowercase().as_str() {
        #[cfg(feature = "local-embeddings")]
        "local" | "fastembed" => Ok(Arc::new(LocalEmbedder::with_model(
            &embedding.model,
            settings.model_cache_dir(),
        )?)),
        #[cfg(not(feature = "local-embeddings"))]
        "local" | "fastembed" => Err(VidseekError::Config(
            "local embeddings require the 'local-embeddings' feature".to_string(),
        )),
        "openai" => Ok(Arc::new(OpenAIEmbedder::with_config(
            &embedding.model,
            embedding.dimensions as usize,
        )?)),
        other => Err(VidseekError::Config(format!(
            "Unknown embedding provider: {}",
            other
        ))),
    }
}

/// Check that a backend returned exactly one vector per input.
pub(crate) fn ensure_count(expected: usize, embeddings: &[Vec<f32>]) -> Result<()> {
    if embeddings.len() == expected {
        Ok(())
    } else {
        Err(VidseekError::EmbeddingUnavailable(format!(
            "backend returned {} embeddings for {} inputs",
            embeddings.len(),
            expected
        )))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic embedder for tests: hashed bag of words, L2-normalized.

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct KeywordEmbedder {
        dimensions: usize,
        pub calls: AtomicUsize,
    }

    impl KeywordEmbedder {
        pub fn new() -> Self {
            Self {
                dimensions: 256,
                calls: AtomicUsize::new(0),
            }
        }

        fn vectorize(&self, text: &str) -> Vec<f32> {
            let mut vector = vec![0.0f32; self.dimensions];
            for word in text
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
            {
                let word = word.to_lowercase();
                // FNV-1a
                let mut hash: u64 = 0xcbf29ce484222325;
                for byte in word.bytes() {
                    hash ^= byte as u64;
                    hash = hash.wrapping_mul(0x100000001b3);
                }
                vector[(hash % self.dimensions as u64) as usize] += 1.0;
            }

            let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                vector.iter_mut().for_each(|x| *x /= norm);
            }
            vector
        }
    }

    #[async_trait]
    impl Embedder for KeywordEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|t| self.vectorize(t)).collect())
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }
    }

    /// Embedder whose backend never comes up.
    pub struct BrokenEmbedder;

    #[async_trait]
    impl Embedder for BrokenEmbedder {
        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(VidseekError::EmbeddingUnavailable("weights missing".to_string()))
        }

        fn dimensions(&self) -> usize {
            384
        }
    }
}
