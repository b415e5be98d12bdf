//! Configuration management for Gatehouse.
//!
//! Loads configuration from ${GATEHOUSE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Gatehouse configuration and data files.
    //!
    //! GATEHOUSE_HOME resolution order:
    //! 1. GATEHOUSE_HOME environment variable (if set)
    //! 2. ~/.config/gatehouse (default)

    use std::path::PathBuf;

    /// Returns the Gatehouse home directory.
    pub fn gatehouse_home() -> PathBuf {
        if let Ok(home) = std::env::var("GATEHOUSE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map_or_else(|| PathBuf::from(".gatehouse"), |h| h.join(".config").join("gatehouse"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        gatehouse_home().join("config.toml")
    }

    /// Returns the default session store path.
    pub fn session_path() -> PathBuf {
        gatehouse_home().join("session.json")
    }

    /// Returns the default log directory.
    pub fn logs_dir() -> PathBuf {
        gatehouse_home().join("logs")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive used when GATEHOUSE_LOG is unset.
    pub level: String,
    /// Log file path (defaults to the logs directory).
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quiet period before re-validating the form, in milliseconds.
    pub debounce_ms: u64,

    /// Optional override for the session store file.
    pub session_file: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            session_file: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_DEBOUNCE_MS: u64 = 500;
    const LOG_FILE_NAME: &str = "gatehouse.log";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Returns the session store path, honoring `session_file`.
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map_or_else(paths::session_path, PathBuf::from)
    }

    /// Returns the log file path, honoring `logging.file`.
    pub fn log_path(&self) -> PathBuf {
        self.logging
            .file
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map_or_else(|| paths::logs_dir().join(Self::LOG_FILE_NAME), PathBuf::from)
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "debounce_ms = 250\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.session_file, None);
    }

    #[test]
    fn test_load_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "debounce_ms = \"soon\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn test_default_template_matches_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_init_creates_config_and_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("debounce_ms = 500"));

        let err = Config::init(&config_path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_session_path_override() {
        let config = Config {
            session_file: Some("/tmp/custom.json".to_string()),
            ..Config::default()
        };
        assert_eq!(config.session_path(), PathBuf::from("/tmp/custom.json"));

        let blank = Config {
            session_file: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(blank.session_path().ends_with("session.json"));
    }

    #[test]
    fn test_log_path_defaults_to_logs_dir() {
        let config = Config::default();
        let path = config.log_path();
        assert!(path.ends_with("logs/gatehouse.log"));
    }
}
