//! YouTube captions through yt-dlp.

use super::{validate_video_id, TranscriptSegment, TranscriptSource};
use crate::config::YoutubeSettings;
use crate::error::{Result, VidseekError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Fetches manual or automatic captions with yt-dlp in json3 format.
pub struct YtDlpTranscriptSource {
    languages: Vec<String>,
    timeout: Duration,
}

impl YtDlpTranscriptSource {
    /// Create a source requesting captions in `languages` (preferred first).
    pub fn new(languages: Vec<String>, timeout: Duration) -> Self {
        Self { languages, timeout }
    }

    /// Create a source from the YouTube settings section.
    pub fn from_settings(settings: &YoutubeSettings) -> Self {
        Self::new(
            settings.languages.clone(),
            Duration::from_secs(settings.fetch_timeout_seconds),
        )
    }

    fn languages_arg(&self) -> String {
        if self.languages.is_empty() {
            "en".to_string()
        } else {
            self.languages.join(",")
        }
    }

    /// Run yt-dlp into `dir`, writing `<id>.<lang>.json3` files.
    async fn download_captions(&self, video_id: &str, dir: &Path) -> Result<()> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let template = dir.join("%(id)s.%(ext)s");

        let mut command = Command::new("yt-dlp");
        command
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs").arg(self.languages_arg())
            .arg("--sub-format").arg("json3")
            .arg("--output").arg(&template)
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(&url)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VidseekError::ToolNotFound("yt-dlp".into()));
            }
            Ok(Err(e)) => {
                return Err(VidseekError::ToolFailed(format!("yt-dlp execution failed: {e}")));
            }
            Err(_) => {
                return Err(VidseekError::ToolFailed(format!(
                    "yt-dlp timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VidseekError::ToolFailed(format!("yt-dlp failed: {}", stderr.trim())));
        }

        Ok(())
    }

    /// Locate the caption file, honoring language preference.
    fn find_caption_file(&self, dir: &Path, video_id: &str) -> Option<PathBuf> {
        for lang in &self.languages {
            let candidate = dir.join(format!("{}.{}.json3", video_id, lang));
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        std::fs::read_dir(dir)
            .ok()?
            .flatten()
            .map(|entry| entry.path())
            .find(|path| path.extension().and_then(|e| e.to_str()) == Some("json3"))
    }
}

#[async_trait]
impl TranscriptSource for YtDlpTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        validate_video_id(video_id)?;

        let tmp = tempfile::tempdir()?;
        info!("Downloading captions for {}", video_id);
        self.download_captions(video_id, tmp.path()).await?;

        let path = self.find_caption_file(tmp.path(), video_id).ok_or_else(|| {
            VidseekError::TranscriptNotFound(format!(
                "no captions available for '{}' in [{}]",
                video_id,
                self.languages_arg()
            ))
        })?;

        debug!("Parsing captions from {}", path.display());
        let content = tokio::fs::read_to_string(&path).await?;
        parse_json3(&content)
    }
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Convert a YouTube json3 caption document into transcript segments.
///
/// Events without text (window setup, bare line breaks) are dropped.
pub fn parse_json3(content: &str) -> Result<Vec<TranscriptSegment>> {
    let captions: Json3Captions = serde_json::from_str(content)?;

    let segments = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json3() {
        let content = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 250000, "id": 1, "wpWinPosId": 1},
                {"tStartMs": 1200, "dDurationMs": 3400, "segs": [{"utf8": "hello"}, {"utf8": " world", "tOffsetMs": 400}]},
                {"tStartMs": 4600, "dDurationMs": 10, "aAppend": 1, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 10000, "dDurationMs": 4000, "segs": [{"utf8": "the answer\nis forty two"}]}
            ]
        }"#;

        let segments = parse_json3(content).unwrap();
        assert_eq!(
            segments,
            vec![
                TranscriptSegment::new("hello world", 1.2, 3.4),
                TranscriptSegment::new("the answer is forty two", 10.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_parse_json3_without_events() {
        assert!(parse_json3("{}").unwrap().is_empty());
        assert!(parse_json3("not json").is_err());
    }

    #[test]
    fn test_find_caption_file_prefers_language_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vid.en.json3"), "{}").unwrap();
        std::fs::write(dir.path().join("vid.de.json3"), "{}").unwrap();

        let source = YtDlpTranscriptSource::new(
            vec!["de".to_string(), "en".to_string()],
            Duration::from_secs(1),
        );
        let found = source.find_caption_file(dir.path(), "vid").unwrap();
        assert!(found.ends_with("vid.de.json3"));
    }

    #[test]
    fn test_find_caption_file_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = YtDlpTranscriptSource::new(vec!["en".to_string()], Duration::from_secs(1));
        assert!(source.find_caption_file(dir.path(), "vid").is_none());
    }
}
