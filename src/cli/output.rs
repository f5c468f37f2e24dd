//! CLI output formatting utilities.

use crate::discovery::DiscoveredVideo;
use crate::matcher::MatchResult;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Width of the match panel, borders included.
const PANEL_WIDTH: usize = 75;

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print discovered video details.
    pub fn video_info(video: &DiscoveredVideo) {
        let published = video
            .published
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        println!("  {} {}", style("*").cyan(), style(&video.title).bold());
        Output::kv("Video ID", &video.id);
        Output::kv("Published", &published);
        Output::kv("Link", &video.link);
    }

    /// Print the boxed match panel followed by the playback URL.
    pub fn match_panel(result: &MatchResult, url: &str) {
        for line in match_panel_lines(result) {
            println!("{}", line);
        }
        println!();
        println!(" Open the link below to start watching at the matched moment:");
        println!(" {}", style(url).cyan().underlined());
        println!();
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Render the match panel as plain lines.
fn match_panel_lines(result: &MatchResult) -> Vec<String> {
    let border = "=".repeat(PANEL_WIDTH);
    let inner = PANEL_WIDTH - 4;

    let mut lines = vec![
        border.clone(),
        format!("{:^width$}", "VIDEO MATCH FOUND", width = PANEL_WIDTH),
        border.clone(),
        format!("| {:<25} | {:<43} |", "Video ID:", result.video_id),
        format!("| {:<25} | {:<43} |", "Timestamp Start:", result.timestamp_start),
        format!("| {:<25} | {:<43} |", "Timestamp End:", result.timestamp_end),
        border.clone(),
        format!("| {:<width$} |", "Matched Text Snippet:", width = inner),
    ];

    for line in textwrap::wrap(&result.matched_text, inner) {
        lines.push(format!("| {:<width$} |", line, width = inner));
    }
    lines.push(border);
    lines
}
