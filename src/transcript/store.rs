//! File-backed transcript artifacts, one JSON file per video.

use super::{validate_video_id, TranscriptSegment};
use crate::error::{Result, VidseekError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory of `<video_id>.json` transcript artifacts.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    /// Create a store rooted at `dir`. The directory is created lazily on save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the artifact for a video.
    pub fn path_for(&self, video_id: &str) -> Result<PathBuf> {
        validate_video_id(video_id)?;
        Ok(self.dir.join(format!("{}.json", video_id)))
    }

    /// Whether an artifact exists for a video.
    pub fn exists(&self, video_id: &str) -> Result<bool> {
        Ok(self.path_for(video_id)?.is_file())
    }

    /// Read the segments stored for a video.
    pub fn load(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let path = self.path_for(video_id)?;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VidseekError::TranscriptNotFound(format!(
                    "no transcript stored for '{}' at {}",
                    video_id,
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let segments: Vec<TranscriptSegment> = serde_json::from_str(&content)?;
        let invalid = segments
            .iter()
            .enumerate()
            .find(|(_, segment)| !has_valid_timing(segment));
        if let Some((index, segment)) = invalid {
            return Err(VidseekError::InvalidInput(format!(
                "segment {} in {} has invalid timing (start {}, duration {})",
                index,
                path.display(),
                segment.start,
                segment.duration
            )));
        }
        debug!("Loaded {} segments from {}", segments.len(), path.display());
        Ok(segments)
    }

    /// Persist the segments for a video, replacing any previous artifact.
    pub fn save(&self, video_id: &str, segments: &[TranscriptSegment]) -> Result<PathBuf> {
        let path = self.path_for(video_id)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, serde_json::to_string_pretty(segments)?)?;
        debug!("Saved {} segments to {}", segments.len(), path.display());
        Ok(path)
    }
}

/// Start and duration must be finite and non-negative.
fn has_valid_timing(segment: &TranscriptSegment) -> bool {
    [segment.start, segment.duration]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("transcripts"));

        let segments = vec![
            TranscriptSegment::new("intro", 0.0, 5.0),
            TranscriptSegment::new("the answer is forty two", 10.0, 4.0),
        ];

        assert!(!store.exists("abc123").unwrap());
        store.save("abc123", &segments).unwrap();
        assert!(store.exists("abc123").unwrap());
        assert_eq!(store.load("abc123").unwrap(), segments);
    }

    #[test]
    fn test_missing_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());

        let err = store.load("missing").unwrap_err();
        assert!(matches!(err, VidseekError::TranscriptNotFound(_)));
    }

    #[test]
    fn test_malformed_artifact_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        assert!(matches!(store.load("broken"), Err(VidseekError::Json(_))));
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());
        assert!(matches!(
            store.load("../secret"),
            Err(VidseekError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_negative_timing() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());
        std::fs::write(
            dir.path().join("neg.json"),
            r#"[{"text": "ok", "start": 0.0, "duration": 2.0},
                {"text": "bad", "start": 10.0, "duration": -4.0}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("early.json"),
            r#"[{"text": "bad", "start": -1.0, "duration": 2.0}]"#,
        )
        .unwrap();

        assert!(matches!(store.load("neg"), Err(VidseekError::InvalidInput(_))));
        assert!(matches!(store.load("early"), Err(VidseekError::InvalidInput(_))));
    }
}
