// src/util/log.rs

//! File-based logging. The terminal belongs to the UI, so tracing output goes to
//! `<log_dir>/ingres-chat.log` instead of stdout.
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ChatError, Result};

pub const LOG_FILE_NAME: &str = "ingres-chat.log";

/// `RUST_LOG` wins over the configured level when set.
pub fn build_filter(default_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| ChatError::LoggingError(e.to_string()))
}

/// Creates (truncating) the log file and installs the global subscriber.
pub fn init_logging(log_dir: &Path, default_level: &str) -> Result<PathBuf> {
    create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_filter(default_level)?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ChatError::LoggingError(e.to_string()))?;

    tracing::info!("ingres-chat {} starting up", env!("CARGO_PKG_VERSION"));
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(build_filter("ingres_chat=notalevel").is_err());
        assert!(build_filter("debug").is_ok());
    }

    #[test]
    fn test_logger_creation() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        let path = init_logging(&log_dir, "info").unwrap();
        tracing::info!("Test info");

        assert_eq!(path, log_dir.join(LOG_FILE_NAME));
        assert!(path.exists());
    }
}
