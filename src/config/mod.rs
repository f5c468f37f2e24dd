//! Configuration module for Vidseek.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{EmbeddingSettings, GeneralSettings, SearchSettings, Settings, YoutubeSettings};
