//! Vidseek - find where a snippet is spoken in a YouTube video
//!
//! Given a text snippet, Vidseek finds the earliest-published YouTube video
//! containing it, downloads that video's transcript, and uses sentence
//! embeddings to locate the transcript segment that best matches the
//! snippet. The result is a link that starts playback at that moment.
//!
//! # Architecture
//!
//! - `timestamp` - `H:MM:SS` display timestamps and playback URLs
//! - `embedding` - Embedding generation (local MiniLM or OpenAI)
//! - `vector_store` - Flat L2 index and the per-video vector store
//! - `matcher` - Best-segment matching for a query
//! - `transcript` - Transcript acquisition (yt-dlp) and storage
//! - `discovery` - Earliest-video search through Serper
//! - `orchestrator` - Pipeline coordination
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use vidseek::config::Settings;
//! use vidseek::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let found = orchestrator.locate("the answer is forty two", false).await?;
//!     println!("{} -> {}", found.matched.matched_text, found.url);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod embedding;
pub mod error;
pub mod matcher;
pub mod openai;
pub mod orchestrator;
pub mod timestamp;
pub mod transcript;
pub mod vector_store;

pub use error::{Result, VidseekError};
