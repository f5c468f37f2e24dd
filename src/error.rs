//! Error types for Vidseek.

use thiserror::Error;

/// Library-level error type for Vidseek operations.
#[derive(Error, Debug)]
pub enum VidseekError {
    #[error("Transcript not found: {0}")]
    TranscriptNotFound(String),

    #[error("Transcript is empty: {0}")]
    EmptyTranscript(String),

    #[error("Embedding backend unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Vector dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid neighbor count k={k} (index holds {available} vectors)")]
    InvalidK { k: usize, available: usize },

    #[error("Invalid timestamp format: {0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Video discovery failed: {0}")]
    Discovery(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Vidseek operations.
pub type Result<T> = std::result::Result<T, VidseekError>;
