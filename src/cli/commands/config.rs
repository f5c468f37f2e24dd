//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::Path;

/// Run the config command against the configuration file at `config_path`.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let mut shown = settings;
            if shown.search.api_key.is_some() {
                shown.search.api_key = Some("********".to_string());
            }
            let toml_str = toml::to_string_pretty(&shown)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Init => {
            if config_path.exists() {
                Output::warning(&format!("Config already exists at {}", config_path.display()));
            } else {
                settings.save_to(&config_path.to_path_buf())?;
                Output::success(&format!("Created default config at {}", config_path.display()));
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_to_chosen_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("vidseek.toml");

        let mut settings = Settings::default();
        settings.youtube.languages = vec!["de".to_string()];
        run_config(&ConfigAction::Init, settings, &path).unwrap();

        let written = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(written.youtube.languages, vec!["de".to_string()]);
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vidseek.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        run_config(&ConfigAction::Init, Settings::default(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
    }
}
