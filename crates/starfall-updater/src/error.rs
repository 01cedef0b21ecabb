//! Error types for the update pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while checking for, downloading, or installing an
/// update, or while starting the game.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpdateError {
    /// Transport failure or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// Unreadable or unwritable paths, permission failures.
    #[error("filesystem error: {0}")]
    FileSystem(String),

    /// Malformed or unreadable archive contents.
    #[error("archive error: {0}")]
    Archive(String),

    /// The game executable is absent at launch time.
    #[error("game executable not found: {0}")]
    ExecutableMissing(PathBuf),
}

impl UpdateError {
    /// Returns a user-friendly message suitable for display as a status line.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the update server. Check your connection.",
            Self::FileSystem(_) => "Could not write the update to disk.",
            Self::Archive(_) => "Could not extract the update package.",
            Self::ExecutableMissing(_) => "Game executable not found.",
        }
    }
}

impl From<reqwest::Error> for UpdateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for UpdateError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem(err.to_string())
    }
}

impl From<zip::result::ZipError> for UpdateError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

/// Result type alias for update operations.
pub type Result<T> = std::result::Result<T, UpdateError>;
