//! Configuration management for the notes TUI.
//!
//! Handles loading and saving configuration from JSONC files.
//! Selects the data source (remote API or local JSON export) and tunes
//! paging and input debounce.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the remote notes API
    pub base_url: String,
    /// Local JSON export to browse instead of the remote API, when set
    /// (relative paths resolve against the config directory)
    pub local_file: Option<String>,
    /// Notes requested per page in browse mode
    pub notes_per_page: u64,
    /// Quiescence window for search and folder-filter input, in milliseconds
    pub search_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://notesandquotes.0xss.us".to_string(),
            local_file: None,
            notes_per_page: 50,
            search_debounce_ms: 300,
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/notes-tui/config.jsonc`
    /// 3. `~/.config/notes-tui/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        // Parse JSONC (JSON with comments)
        // Strip // style comments manually
        let json_content: String = content
            .lines()
            .map(|line| {
                // Remove // comments (but preserve // in strings)
                if let Some(comment_pos) = line.find("//") {
                    // Check if // is inside a string (simplified - doesn't handle escaped quotes)
                    let before_comment = &line[..comment_pos];
                    let quote_count = before_comment.matches('"').count();
                    if quote_count % 2 == 0 {
                        // Not inside a string, remove comment
                        line[..comment_pos].trim_end()
                    } else {
                        // Inside a string, keep as is
                        line
                    }
                } else {
                    line
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        let config: Config =
            serde_json::from_str(&json_content).with_context(|| "Failed to deserialize config")?;

        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    ///
    /// # Details
    /// Creates config directory if it doesn't exist.
    #[allow(dead_code)] // Useful for saving config changes from within the app
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to config file or error
    ///
    /// # Details
    /// Returns `$XDG_CONFIG_HOME/notes-tui/config.jsonc` or
    /// `~/.config/notes-tui/config.jsonc`.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join("notes-tui").join("config.jsonc"))
    }

    /// Get the local notes file path, when one is configured.
    ///
    /// # Returns
    /// * `Result<Option<PathBuf>>` - Path to the local export, if configured
    ///
    /// # Details
    /// If the configured path is absolute, returns it as-is.
    /// Otherwise, returns the path relative to the config directory.
    pub fn local_file_path(&self) -> Result<Option<PathBuf>> {
        let Some(local_file) = &self.local_file else {
            return Ok(None);
        };
        let local_path = Path::new(local_file);
        if local_path.is_absolute() {
            Ok(Some(local_path.to_path_buf()))
        } else {
            let config_dir = config_dir()
                .ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
            Ok(Some(config_dir.join("notes-tui").join(local_file)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.base_url.is_empty());
        assert!(config.local_file.is_none());
        assert_eq!(config.notes_per_page, 50);
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let config = Config {
            base_url: "http://localhost:8080".to_string(),
            notes_per_page: 25,
            ..Config::default()
        };

        config.save(Some(&config_path)).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.base_url, "http://localhost:8080");
        assert_eq!(loaded.notes_per_page, 25);
    }

    #[test]
    fn test_config_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let jsonc_content = r#"{
            // Base URL of the notes API
            "base_url": "http://localhost:8080",
            "local_file": "notes.json"
        }"#;

        fs::write(&config_path, jsonc_content).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.base_url, "http://localhost:8080");
        assert_eq!(loaded.local_file.as_deref(), Some("notes.json"));
    }

    #[test]
    fn test_local_file_path_absolute_passthrough() {
        let config = Config {
            local_file: Some("/tmp/notes.json".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.local_file_path().unwrap().unwrap(),
            PathBuf::from("/tmp/notes.json")
        );
    }

    #[test]
    fn test_local_file_path_none_when_unset() {
        let config = Config::default();
        assert!(config.local_file_path().unwrap().is_none());
    }
}
