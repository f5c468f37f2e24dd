//! Local sentence embeddings via fastembed (ONNX Runtime).
//!
//! The model is loaded on first use and kept for the lifetime of the
//! embedder. Concurrent first calls wait on the same load; a failed load is
//! not cached, so the next call tries again.

use super::{ensure_count, Embedder};
use crate::error::{Result, VidseekError};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

/// Default model, matching the 384-dimensional MiniLM sentence encoder.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// A loaded sentence encoder. Calls are blocking.
trait SentenceModel: Send + Sync {
    fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;
}

impl SentenceModel for TextEmbedding {
    fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        self.embed(texts, None)
            .map_err(|e| VidseekError::EmbeddingUnavailable(format!("embedding failed: {}", e)))
    }
}

/// Blocking constructor for the model, run at most once per successful load.
type ModelLoader = Arc<dyn Fn() -> Result<Arc<dyn SentenceModel>> + Send + Sync>;

/// Embedder backed by a locally executed sentence-transformer model.
pub struct LocalEmbedder {
    model_name: String,
    dimensions: usize,
    loader: ModelLoader,
    engine: OnceCell<Arc<dyn SentenceModel>>,
}

impl LocalEmbedder {
    /// Create an embedder for the default model.
    pub fn new() -> Self {
        Self::with_loader(
            DEFAULT_MODEL,
            384,
            fastembed_loader(EmbeddingModel::AllMiniLML6V2, DEFAULT_MODEL, None),
        )
    }

    /// Create an embedder for a named model, optionally caching weights in `cache_dir`.
    pub fn with_model(name: &str, cache_dir: Option<PathBuf>) -> Result<Self> {
        let (model, dimensions) = resolve_model(name)?;
        Ok(Self::with_loader(
            name,
            dimensions,
            fastembed_loader(model, name, cache_dir),
        ))
    }

    fn with_loader(model_name: &str, dimensions: usize, loader: ModelLoader) -> Self {
        Self {
            model_name: model_name.to_string(),
            dimensions,
            loader,
            engine: OnceCell::new(),
        }
    }

    /// Name of the configured model.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Whether the model has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.engine.initialized()
    }

    async fn engine(&self) -> Result<Arc<dyn SentenceModel>> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                info!("Loading embedding model {}", self.model_name);

                let loader = Arc::clone(&self.loader);
                let loaded = tokio::task::spawn_blocking(move || (*loader)())
                    .await
                    .map_err(|e| VidseekError::EmbeddingUnavailable(format!("model load panicked: {}", e)))??;

                info!("Embedding model {} ready", self.model_name);
                Ok::<_, VidseekError>(loaded)
            })
            .await?;

        Ok(Arc::clone(engine))
    }
}

impl Default for LocalEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let engine = self.engine().await?;
        let inputs = texts.to_vec();

        debug!("Generating embeddings for {} texts", inputs.len());
        let embeddings = tokio::task::spawn_blocking(move || engine.encode(inputs))
            .await
            .map_err(|e| VidseekError::EmbeddingUnavailable(format!("embedding task panicked: {}", e)))??;

        ensure_count(texts.len(), &embeddings)?;
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Loader that initializes a fastembed model, downloading weights if needed.
fn fastembed_loader(model: EmbeddingModel, name: &str, cache_dir: Option<PathBuf>) -> ModelLoader {
    let name = name.to_string();
    Arc::new(move || -> Result<Arc<dyn SentenceModel>> {
        let mut options = InitOptions::new(model.clone()).with_show_download_progress(false);
        if let Some(dir) = &cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let loaded = TextEmbedding::try_new(options).map_err(|e| {
            VidseekError::EmbeddingUnavailable(format!("failed to load model '{}': {}", name, e))
        })?;
        Ok(Arc::new(loaded) as Arc<dyn SentenceModel>)
    })
}

/// Map a configured model name onto a fastembed model and its dimensionality.
fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize)> {
    let normalized = name
        .trim()
        .trim_start_matches("sentence-transformers/")
        .trim_start_matches("BAAI/")
        .to_lowercase();

    match normalized.as_str() {
        "all-minilm-l6-v2" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "all-minilm-l12-v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        _ => Err(VidseekError::Config(format!(
            "Unsupported local embedding model: {}",
            name
        ))),
    }
}
