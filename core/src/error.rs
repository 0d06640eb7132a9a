//! Error types for profile discovery and history connections.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// None of the configured search paths holds a `profiles.ini`
    #[error("profiles.ini not found in any of the configured paths: {searched:?}")]
    ProfilesNotFound { searched: Vec<PathBuf> },

    /// The registry lacks the `Path` entry for the selected profile
    #[error("no Path entry in section [{section}] of {}", registry.display())]
    ProfileEntry { registry: PathBuf, section: String },

    #[error("home directory not found")]
    HomeDirNotFound,

    #[error("no open history connection")]
    NotConnected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
