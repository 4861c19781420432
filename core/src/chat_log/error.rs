//! Error types for chat log access

use std::path::PathBuf;
use thiserror::Error;

/// Errors during live log reading
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("failed to open log file {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log file metadata for {path}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read from log file {path}")]
    ReadLine {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to seek in log file {path}")]
    Seek {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no account announcement found in {path}")]
    PlayerNameNotFound { path: PathBuf },
}

/// Errors during archival segment replay
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to read log directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open archive {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decompress archive {path}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
