//! Serper.dev video search.

use super::{extract_video_id, DiscoveredVideo, VideoDiscovery};
use crate::config::SearchSettings;
use crate::error::{Result, VidseekError};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Date layouts Serper uses for the `date` field.
const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%Y-%m-%d", "%d %b %Y", "%B %d, %Y"];

/// One entry of the `videos` array in a Serper response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerperVideo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl SerperVideo {
    /// Parsed publication date, if the `date` field is present and readable.
    pub fn published(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?.trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
    }

    fn video_id(&self) -> Option<String> {
        self.link.as_deref().and_then(extract_video_id)
    }
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    videos: Vec<SerperVideo>,
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: String,
    #[serde(rename = "type")]
    kind: &'a str,
    gl: &'a str,
    num: u32,
}

/// Pick the earliest-published video that has a usable video ID.
///
/// Undated results rank after every dated one; among equal dates the first
/// result in API order wins.
pub fn select_earliest(videos: &[SerperVideo]) -> Option<DiscoveredVideo> {
    videos
        .iter()
        .filter_map(|video| video.video_id().map(|id| (video, id)))
        .min_by_key(|(video, _)| video.published().unwrap_or(NaiveDate::MAX))
        .map(|(video, id)| DiscoveredVideo {
            id,
            title: video.title.clone().unwrap_or_else(|| "No Title".to_string()),
            link: video.link.clone().unwrap_or_default(),
            published: video.published(),
        })
}

/// Video discovery through the Serper search API.
pub struct SerperSearcher {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    country: String,
    max_results: u32,
}

impl SerperSearcher {
    /// Create a searcher from settings; `api_key` must be non-empty.
    pub fn new(settings: &SearchSettings, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
            VidseekError::Config(
                "Serper API key not set. Set it with: export SERPER_API_KEY='...' \
                 or [search] api_key in the config file"
                    .to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: settings.endpoint.clone(),
            country: settings.country.clone(),
            max_results: settings.max_results,
        })
    }

    fn build_request(&self, snippet: &str) -> SerperRequest<'_> {
        SerperRequest {
            q: format!("\"{}\" site:youtube.com", snippet.trim()),
            kind: "video",
            gl: &self.country,
            num: self.max_results,
        }
    }
}

#[async_trait]
impl VideoDiscovery for SerperSearcher {
    #[instrument(skip(self))]
    async fn find_earliest(&self, snippet: &str) -> Result<DiscoveredVideo> {
        if snippet.trim().is_empty() {
            return Err(VidseekError::InvalidInput("search snippet is empty".to_string()));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&self.build_request(snippet))
            .send()
            .await?
            .error_for_status()?;

        let body: SerperResponse = response.json().await.map_err(|e| {
            VidseekError::Discovery(format!("Unexpected Serper response: {}", e))
        })?;
        debug!("Serper returned {} videos", body.videos.len());

        let video = select_earliest(&body.videos).ok_or_else(|| {
            VidseekError::VideoNotFound(format!("no YouTube video matches \"{}\"", snippet))
        })?;

        info!(
            "Earliest video: {} ({}) published {:?}",
            video.id, video.title, video.published
        );
        Ok(video)
    }
}
