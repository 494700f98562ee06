//! Log setup
//!
//! The terminal belongs to the UI, so logs always go to a file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured filter
pub const LOG_ENV_VAR: &str = "WHEELDEAL_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not install log subscriber: {0}")]
    Install(String),
}

/// Filter from `WHEELDEAL_LOG` if set and valid, otherwise `fallback`
pub fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber, appending to `path`
pub fn init(path: &Path, filter: &str) -> Result<(), LoggingError> {
    let open_error = |source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(open_error)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_error)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(build_filter(filter))
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fallback_filter_applies_without_env() {
        if std::env::var(LOG_ENV_VAR).is_err() {
            let filter = build_filter("wheeldeal=debug");
            assert!(filter.to_string().contains("wheeldeal=debug"));
        }
    }

    #[test]
    fn test_init_creates_log_directory() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("nested").join("wheeldeal.log");

        // A subscriber may already be installed by another test; only the
        // file creation is asserted.
        let _ = init(&path, "debug");
        assert!(path.exists(), "Log file should be created");
    }
}
