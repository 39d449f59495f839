use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems that stop a run before anything is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Target directory does not exist: {0}")]
    MissingRoot(PathBuf),
    #[error("Target path is not a directory: {0}")]
    RootNotDirectory(PathBuf),
    #[error("Backup directory {backup} must not be inside target directory {root}")]
    BackupConflict { backup: PathBuf, root: PathBuf },
    #[error("Invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Failed to open log file {0}")]
    LogOpen(PathBuf, #[source] io::Error),
    #[error("Failed to resolve path {0}")]
    Resolve(PathBuf, #[source] io::Error),
}

/// A recoverable failure scoped to one directory or one entry.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("Cannot read directory {0}: {1}")]
    Enumerate(PathBuf, #[source] io::Error),
    #[error("Error walking entry: {0}")]
    Walk(#[source] ignore::Error),
    #[error("Cannot inspect {0}: {1}")]
    Metadata(PathBuf, #[source] io::Error),
    #[error("Backup failed for {0}, not deleting: {1}")]
    Backup(PathBuf, #[source] io::Error),
    #[error("Failed to delete {0}: {1}")]
    Delete(PathBuf, #[source] io::Error),
}
