//! Archive extraction into the installation directory.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{Result, UpdateError};

/// Extracts every entry of the staged ZIP archive into `install_dir`.
///
/// Existing files are overwritten unconditionally; entries are processed one
/// after another. Entries whose names would escape `install_dir` are
/// rejected. Files already written are not rolled back when a later entry
/// fails.
pub(crate) fn extract_over(archive_path: &Path, install_dir: &Path) -> Result<()> {
    tracing::debug!(
        "Extracting {:?} into {:?}",
        archive_path,
        install_dir
    );

    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(UpdateError::Archive(format!(
                "entry '{}' escapes the installation directory",
                entry.name()
            )));
        };
        let dest = install_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest)?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&dest)?;
        io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dest, fs::Permissions::from_mode(mode))?;
        }
    }

    tracing::info!("Extracted {} entries into {:?}", archive.len(), install_dir);
    Ok(())
}
