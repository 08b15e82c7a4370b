use std::path::PathBuf;
use thiserror::Error;

use crate::models::UserId;

/// All errors produced by the presence analyzer.
#[derive(Error, Debug)]
pub enum PresenceError {
    /// The presence CSV could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested user has no records in the loaded data.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PresenceError {
    /// `true` for errors a client caused by asking for data that is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PresenceError::UserNotFound(_))
    }
}

/// Convenience alias used throughout the presence crates.
pub type Result<T> = std::result::Result<T, PresenceError>;
