//! Local version marker file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// The persisted version token for the current installation.
///
/// The token is opaque text; it is compared byte-for-byte against the remote
/// token, never parsed.
#[derive(Debug, Clone)]
pub struct VersionMarker {
    path: PathBuf,
}

impl VersionMarker {
    /// Create a marker handle for the given path.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the marker file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token.
    ///
    /// Returns `Ok(None)` when the marker does not exist, which the checker
    /// treats as "never installed".
    pub fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => Ok(Some(token)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite the stored token.
    pub fn write(&self, token: &str) -> Result<()> {
        std::fs::write(&self.path, token)?;
        Ok(())
    }
}
