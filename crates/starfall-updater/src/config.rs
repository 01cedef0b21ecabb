//! Launcher configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the version marker file, both locally and on the update server.
pub const VERSION_FILE: &str = "version.txt";

/// Default archive URL polled for updates.
const DEFAULT_ARCHIVE_URL: &str = "https://updates.starfall-game.com/latest.zip";

/// Default game executable name.
#[cfg(windows)]
const DEFAULT_GAME_EXECUTABLE: &str = "starfall.exe";

#[cfg(not(windows))]
const DEFAULT_GAME_EXECUTABLE: &str = "starfall";

/// Settings for the launcher and its update pipeline.
///
/// The defaults mirror how the launcher runs in production: the installation
/// directory is the process working directory and the archive is staged under
/// the platform temp directory. Tests point these at scratch locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// URL of the update archive.
    pub archive_url: String,
    /// Directory the game is installed into; extraction target.
    pub install_dir: PathBuf,
    /// File name of the game executable inside `install_dir`.
    pub game_executable: String,
    /// Path the archive is staged at while downloading.
    pub staging_path: PathBuf,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            install_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            game_executable: DEFAULT_GAME_EXECUTABLE.to_string(),
            staging_path: std::env::temp_dir().join("starfall-update.zip"),
        }
    }
}

impl LauncherConfig {
    /// URL of the remote version token, derived from the archive URL by
    /// replacing the archive file name with `version.txt`.
    #[must_use]
    pub fn version_url(&self) -> String {
        match self.archive_url.rsplit_once('/') {
            Some((base, _file)) => format!("{base}/{VERSION_FILE}"),
            None => VERSION_FILE.to_string(),
        }
    }

    /// Path of the local version marker file.
    #[must_use]
    pub fn marker_path(&self) -> PathBuf {
        self.install_dir.join(VERSION_FILE)
    }

    /// Path of the game executable.
    #[must_use]
    pub fn executable_path(&self) -> PathBuf {
        self.install_dir.join(&self.game_executable)
    }

    /// Replace the installation directory.
    #[must_use]
    pub fn with_install_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.install_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Replace the archive URL.
    #[must_use]
    pub fn with_archive_url(mut self, url: impl Into<String>) -> Self {
        self.archive_url = url.into();
        self
    }

    /// Replace the staging path.
    #[must_use]
    pub fn with_staging_path(mut self, path: impl AsRef<Path>) -> Self {
        self.staging_path = path.as_ref().to_path_buf();
        self
    }
}
