//! CLI module for Vidseek.

pub mod commands;
mod output;

pub use output::Output;

use crate::config::Settings;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vidseek - find where a snippet is spoken in a YouTube video
///
/// Searches for the earliest video containing a snippet, downloads its
/// transcript and returns a link that starts playback at the matching moment.
#[derive(Parser, Debug)]
#[command(name = "vidseek")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration file in effect: `--config` if given, else the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .as_ref()
            .map(|path| Settings::expand_path(path))
            .unwrap_or_else(Settings::default_config_path)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the video a snippet comes from and jump to the moment it is spoken
    Find {
        /// The text snippet to search for
        snippet: String,

        /// Re-download the transcript even if one is stored
        #[arg(short, long)]
        force: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Match a query against the transcript of a known video
    Match {
        /// YouTube URL or video ID
        video: String,

        /// Text to look for in the transcript
        query: String,

        /// Re-download the transcript even if one is stored
        #[arg(short, long)]
        force: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download and store the transcript of a video
    Fetch {
        /// YouTube URL or video ID
        video: String,

        /// Re-download even if a transcript is already stored
        #[arg(short, long)]
        force: bool,
    },

    /// Show the earliest-published video containing a snippet
    Discover {
        /// The text snippet to search for
        snippet: String,
    },

    /// Build a playback URL from a video ID and a H:MM:SS or M:SS timestamp
    Url {
        /// YouTube URL or video ID
        video: String,

        /// Start time (e.g. 1:02:03 or 02:03)
        timestamp: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_find() {
        let cli = Cli::parse_from(["vidseek", "-vv", "find", "to be or not to be", "--json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Find { snippet, force, json } => {
                assert_eq!(snippet, "to be or not to be");
                assert!(!force);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_match_with_global_config() {
        let cli = Cli::parse_from([
            "vidseek",
            "match",
            "dQw4w9WgXcQ",
            "never gonna",
            "--config",
            "/tmp/vidseek.toml",
        ]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/vidseek.toml"));
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/vidseek.toml"));
        assert!(matches!(cli.command, Commands::Match { .. }));
    }

    #[test]
    fn test_config_path_defaults() {
        let cli = Cli::parse_from(["vidseek", "doctor"]);
        assert_eq!(cli.config_path(), Settings::default_config_path());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
