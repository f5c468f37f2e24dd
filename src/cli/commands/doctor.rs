//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::create_embedder;
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);
        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Vidseek Doctor");
    println!();

    let sections = [
        ("External Tools", vec![check_ytdlp()]),
        ("API Configuration", check_api_keys(settings)),
        ("Embeddings", vec![check_embedding(settings)]),
        ("Directories", check_directories(settings)),
        ("Configuration", vec![check_config_file(config_path)]),
    ];

    let mut errors = 0;
    let mut warnings = 0;
    for (title, checks) in &sections {
        println!("{}", style(title).bold());
        for check in checks {
            check.print();
            match check.status {
                CheckStatus::Error => errors += 1,
                CheckStatus::Warning => warnings += 1,
                CheckStatus::Ok => {}
            }
        }
        println!();
    }

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Vidseek.",
            errors
        ));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Vidseek is ready to use.");
    }

    Ok(())
}

/// Check that yt-dlp is installed.
fn check_ytdlp() -> CheckResult {
    match Command::new("yt-dlp").arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok("yt-dlp", &version)
        }
        Ok(_) => CheckResult::error("yt-dlp", "installed but not working", install_hint_ytdlp()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error("yt-dlp", "not found", install_hint_ytdlp())
        }
        Err(e) => CheckResult::error("yt-dlp", &format!("error: {}", e), install_hint_ytdlp()),
    }
}

/// Check the Serper key, and the OpenAI key when embeddings go through OpenAI.
fn check_api_keys(settings: &Settings) -> Vec<CheckResult> {
    let mut results = vec![match settings.serper_api_key() {
        Some(key) => CheckResult::ok("Serper API key", &format!("configured ({})", mask(&key))),
        None => CheckResult::warning(
            "Serper API key",
            "not set (find/discover unavailable)",
            "Set with: export SERPER_API_KEY='...'",
        ),
    }];

    if settings.embedding.provider.eq_ignore_ascii_case("openai") {
        results.push(if crate::openai::is_api_key_configured() {
            CheckResult::ok("OPENAI_API_KEY", "configured")
        } else {
            CheckResult::error(
                "OPENAI_API_KEY",
                "not set",
                "Set with: export OPENAI_API_KEY='sk-...' or use provider = \"local\"",
            )
        });
    }

    results
}

/// Check that the embedding configuration resolves to a usable provider.
fn check_embedding(settings: &Settings) -> CheckResult {
    match create_embedder(settings) {
        Ok(embedder) => CheckResult::ok(
            "Embedding model",
            &format!(
                "{} via {} ({} dimensions)",
                settings.embedding.model,
                settings.embedding.provider,
                embedder.dimensions()
            ),
        ),
        Err(e) => CheckResult::error(
            "Embedding model",
            &e.to_string(),
            "Check [embedding] provider and model in the config file",
        ),
    }
}

/// Check data directories.
fn check_directories(settings: &Settings) -> Vec<CheckResult> {
    [("Data directory", settings.data_dir()), ("Transcripts", settings.transcript_dir())]
        .into_iter()
        .map(|(name, dir)| {
            if dir.exists() {
                CheckResult::ok(name, &dir.display().to_string())
            } else {
                CheckResult::warning(
                    name,
                    &format!("{} (will be created)", dir.display()),
                    "Directory will be created on first use",
                )
            }
        })
        .collect()
}

/// Check if the config file in use exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &config_path.display().to_string())
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: vidseek config init",
        )
    }
}

/// Mask a secret, keeping a few characters at each end.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
