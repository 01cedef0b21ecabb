//! Starting the installed game executable.

use std::process::Command;

use crate::config::LauncherConfig;
use crate::error::{Result, UpdateError};

/// Starts the game as a detached process.
///
/// The child is not waited on; the launcher may exit immediately afterward.
/// Returns [`UpdateError::ExecutableMissing`] when the executable is absent
/// from the installation directory.
pub fn launch_game(config: &LauncherConfig) -> Result<()> {
    let executable = config.executable_path();

    if !executable.exists() {
        return Err(UpdateError::ExecutableMissing(executable));
    }

    tracing::info!("Launching {:?}", executable);

    // `start` hands the file to the shell's default handling on Windows,
    // matching a double-click; elsewhere the executable is spawned directly.
    #[cfg(windows)]
    let spawned = Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(&executable)
        .current_dir(&config.install_dir)
        .spawn();

    #[cfg(not(windows))]
    let spawned = Command::new(&executable)
        .current_dir(&config.install_dir)
        .spawn();

    spawned.map_err(|err| {
        UpdateError::FileSystem(format!("failed to start {}: {err}", executable.display()))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = LauncherConfig::default().with_install_dir(dir.path());

        let result = launch_game(&config);
        assert!(matches!(result, Err(UpdateError::ExecutableMissing(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_launches_existing_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut config = LauncherConfig::default().with_install_dir(dir.path());
        config.game_executable = "game.sh".to_string();

        let path = config.executable_path();
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        launch_game(&config).unwrap();
    }
}
