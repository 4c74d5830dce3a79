//! Per-run log file. Every run appends leveled lines to
//! `<hostname>/log/rover.log`; failing to set that file up is fatal
//! before any upload work starts.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::Level;

pub const LOG_DIR: &str = "log";
pub const LOG_FILE: &str = "rover.log";

#[derive(Debug, Error)]
pub enum LogSetupError {
    #[error("cannot create log directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: String,
        source: std::io::Error,
    },
}

/// Creates the host-scoped log directory, opens the log file for append
/// and installs it as the global tracing writer. Writes are unbuffered,
/// so the log is complete whenever the process exits.
pub fn init(host_name: &str) -> Result<(), LogSetupError> {
    let dir = Path::new(host_name).join(LOG_DIR);
    fs::create_dir_all(&dir).map_err(|source| LogSetupError::CreateDir {
        path: dir.display().to_string(),
        source,
    })?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LogSetupError::OpenFile {
            path: path.display().to_string(),
            source,
        })?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .with_writer(Arc::new(file))
        .finish();
    // A subscriber may already be installed when tests drive the CLI
    // logic in-process; the first one wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_host_scoped_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let host_root = dir.path().join("test-host");
        init(host_root.to_str().unwrap()).unwrap();
        assert!(host_root.join(LOG_DIR).join(LOG_FILE).exists());
    }

    #[test]
    fn unwritable_parent_is_a_create_dir_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"occupied").unwrap();
        let err = init(blocker.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LogSetupError::CreateDir { .. }));
    }
}
