//! Video discovery: find the YouTube video a snippet originally comes from.

mod serper;

pub use serper::{select_earliest, SerperSearcher, SerperVideo};

use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A candidate video returned by discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredVideo {
    /// YouTube video ID.
    pub id: String,
    /// Video title.
    pub title: String,
    /// Link the search engine returned.
    pub link: String,
    /// Publication date, when the search engine reported a parseable one.
    pub published: Option<NaiveDate>,
}

/// Trait for video discovery backends.
#[async_trait]
pub trait VideoDiscovery: Send + Sync {
    /// Find the earliest-published video containing `snippet`.
    async fn find_earliest(&self, snippet: &str) -> Result<DiscoveredVideo>;
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Matches various YouTube URL formats and bare video IDs
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("video id regex is valid")
    })
}

fn is_youtube_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    ["youtube.com", "youtu.be", "youtube-nocookie.com"]
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// Extract the video ID from a YouTube URL or bare ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if let Ok(url) = url::Url::parse(input) {
        if url.host_str().is_some_and(is_youtube_host) {
            if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
                if !v.is_empty() {
                    return Some(v.into_owned());
                }
            }
        } else if url.host_str().is_some() {
            return None;
        }
    }

    let caps = video_id_regex().captures(input)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}
