//! Startup configuration file
//!
//! Reads `config.json` from the XDG config directory (`~/.config/wheeldeal/`
//! on Linux). A missing default file simply means defaults; a file named on
//! the command line must exist.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::theme::Theme;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Name of the default log file inside the data directory
pub const LOG_FILE_NAME: &str = "wheeldeal.log";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings that can be set in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Theme at startup
    pub theme: Theme,
    /// Tracing filter, `EnvFilter` syntax
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// location is tried and a missing file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match AppDirs::new().map(|dirs| dirs.config_file()) {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Platform directories used by the application
#[derive(Debug, Clone)]
pub struct AppDirs {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppDirs {
    /// Resolves XDG-compliant directories.
    ///
    /// Returns `None` if they cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "wheeldeal")?;
        Some(Self {
            config_dir: project_dirs.config_dir().to_path_buf(),
            data_dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    /// Uses explicit directories, e.g. for testing
    pub fn with_dirs(config_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            config_dir,
            data_dir,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).expect("Should write config");
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_reads_theme_and_filter() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, r#"{ "theme": "dark", "log_filter": "wheeldeal=debug" }"#);

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.log_filter, "wheeldeal=debug");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, r#"{ "theme": "dark" }"#);

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("missing.json");
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, r#"{ "theme": "sepia" }"#);
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, r#"{ "colour": "red" }"#);
        assert!(AppConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_app_dirs_paths() {
        let dirs = AppDirs::with_dirs(PathBuf::from("/cfg"), PathBuf::from("/data"));
        assert_eq!(dirs.config_file(), PathBuf::from("/cfg/config.json"));
        assert_eq!(dirs.log_file(), PathBuf::from("/data/wheeldeal.log"));
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(dirs) = AppDirs::new() {
            let path_str = dirs.config_file().to_string_lossy().to_string();
            assert!(
                path_str.contains("wheeldeal"),
                "Config path should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}
