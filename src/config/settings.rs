//! Configuration settings for Vidseek.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when no Serper key is configured.
pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub embedding: EmbeddingSettings,
    pub search: SearchSettings,
    pub youtube: YoutubeSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data (transcripts live under it).
    pub data_dir: String,
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.vidseek".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (local, openai).
    pub provider: String,
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
    /// Where the local provider caches downloaded model weights.
    pub cache_dir: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "local".to_string(),
            model: "all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            cache_dir: None,
        }
    }
}

/// Serper video search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Serper API key. Falls back to `SERPER_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Search endpoint.
    pub endpoint: String,
    /// Maximum number of video results to request.
    pub max_results: u32,
    /// Geographic location for results.
    pub country: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://google.serper.dev/search".to_string(),
            max_results: 10,
            country: "us".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// YouTube-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Watch page used when building playback URLs.
    pub watch_url: String,
    /// Caption languages to request, in order of preference.
    pub languages: Vec<String>,
    /// Timeout for a single caption download in seconds.
    pub fetch_timeout_seconds: u64,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            watch_url: "https://www.youtube.com/watch".to_string(),
            languages: vec!["en".to_string()],
            fetch_timeout_seconds: 120,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::VidseekError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidseek")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Directory holding persisted transcript artifacts.
    pub fn transcript_dir(&self) -> PathBuf {
        self.data_dir().join("transcripts")
    }

    /// Expanded model cache directory, if configured.
    pub fn model_cache_dir(&self) -> Option<PathBuf> {
        self.embedding.cache_dir.as_deref().map(Self::expand_path)
    }

    /// Tracing filter directive: `-v` flags win over the configured level.
    pub fn log_directive(&self, verbose: u8) -> String {
        let level = match verbose {
            0 => self.general.log_level.trim(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let level = if level.is_empty() { "warn" } else { level };
        format!("vidseek={}", level)
    }

    /// Serper API key from the config file or the environment.
    pub fn serper_api_key(&self) -> Option<String> {
        self.search
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(SERPER_API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.embedding.provider, "local");
        assert_eq!(settings.embedding.model, "all-MiniLM-L6-v2");
        assert_eq!(settings.embedding.dimensions, 384);
        assert_eq!(settings.search.max_results, 10);
        assert_eq!(settings.youtube.watch_url, "https://www.youtube.com/watch");
        assert!(settings.transcript_dir().ends_with("transcripts"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [general]
            data_dir = "/var/lib/vidseek"

            [search]
            max_results = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.data_dir(), PathBuf::from("/var/lib/vidseek"));
        assert_eq!(
            settings.transcript_dir(),
            PathBuf::from("/var/lib/vidseek/transcripts")
        );
        assert_eq!(settings.search.max_results, 5);
        assert_eq!(settings.search.country, "us");
        assert_eq!(settings.embedding.provider, "local");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.search.api_key = Some("secret".to_string());
        settings.youtube.languages = vec!["de".to_string(), "en".to_string()];
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.search.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.youtube.languages, vec!["de", "en"]);
        assert_eq!(loaded.serper_api_key().as_deref(), Some("secret"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.general.data_dir, "~/.vidseek");
    }

    #[test]
    fn test_log_directive() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_directive(0), "vidseek=warn");

        settings.general.log_level = "debug".to_string();
        assert_eq!(settings.log_directive(0), "vidseek=debug");
        assert_eq!(settings.log_directive(1), "vidseek=info");
        assert_eq!(settings.log_directive(3), "vidseek=trace");

        settings.general.log_level = String::new();
        assert_eq!(settings.log_directive(0), "vidseek=warn");
    }
}
