//! Log routing for the TUI.
//!
//! The terminal owns stdout, so logs go to a file when one is configured
//! (via the `--log-file` flag or `COURIER_LOG_FILE`) and are otherwise
//! discarded. Filtering follows `COURIER_LOG` (standard env-filter
//! syntax), defaulting to `info`.

use anyhow::Context;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE_ENV: &str = "COURIER_LOG_FILE";
pub const LOG_FILTER_ENV: &str = "COURIER_LOG";

/// Open the log file for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. A no-op when no log file is configured.
pub fn init_tracing(log_file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = log_file.or_else(|| std::env::var(LOG_FILE_ENV).ok().map(PathBuf::from));
    let Some(path) = path else {
        return Ok(());
    };

    let file = open_log_file(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_log_file_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courier.log");

        let _first = open_log_file(&path).unwrap();
        assert!(path.exists());

        // Reopening must not truncate.
        std::fs::write(&path, "existing line\n").unwrap();
        let _second = open_log_file(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "existing line\n");
    }
}
