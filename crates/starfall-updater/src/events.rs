//! Progress events emitted by the update pipeline.

use std::fmt;

/// Phase of the update pipeline, in the order phases occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    /// Streaming the archive to the staging file.
    Downloading,
    /// Extracting archive entries into the installation directory.
    Extracting,
    /// Update finished and staged archive removed.
    Installed,
}

impl UpdatePhase {
    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Downloading => "downloading",
            Self::Extracting => "extracting",
            Self::Installed => "installed",
        }
    }
}

impl fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Download progress snapshot.
///
/// `total` is `None` when the server did not advertise a usable
/// `Content-Length`, in which case progress is indeterminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Bytes written to the staging file so far.
    pub downloaded: u64,
    /// Total bytes expected, when known.
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Progress as a whole percentage (0 to 100), floor-rounded.
    ///
    /// Returns `None` when the total size is unknown or zero; a zero total
    /// counts as indeterminate, same as an absent `Content-Length`.
    #[must_use]
    pub fn percentage(&self) -> Option<u8> {
        let total = self.total.filter(|total| *total > 0)?;
        Some(((self.downloaded * 100 / total).min(100)) as u8)
    }
}

/// Event emitted by the update pipeline.
///
/// Events are strictly ordered: zero or more `Downloading` events with
/// non-decreasing percentages, then `Extracting`, then `Installed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateEvent {
    /// Archive bytes are being streamed to disk.
    Downloading(DownloadProgress),
    /// Archive entries are being extracted (indeterminate progress).
    Extracting,
    /// Pipeline finished; equivalent to 100%.
    Installed,
}

impl UpdateEvent {
    /// The phase this event belongs to.
    #[must_use]
    pub const fn phase(&self) -> UpdatePhase {
        match self {
            Self::Downloading(_) => UpdatePhase::Downloading,
            Self::Extracting => UpdatePhase::Extracting,
            Self::Installed => UpdatePhase::Installed,
        }
    }

    /// Percentage carried by this event, when determinate.
    #[must_use]
    pub fn percent(&self) -> Option<u8> {
        match self {
            Self::Downloading(progress) => progress.percentage(),
            Self::Extracting => None,
            Self::Installed => Some(100),
        }
    }
}

/// Format bytes as a human-readable string.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_floor() {
        let progress = DownloadProgress {
            downloaded: 999,
            total: Some(1000),
        };
        assert_eq!(progress.percentage(), Some(99));

        let progress = DownloadProgress {
            downloaded: 1000,
            total: Some(1000),
        };
        assert_eq!(progress.percentage(), Some(100));
    }

    #[test]
    fn test_percentage_zero_total_is_indeterminate() {
        let progress = DownloadProgress {
            downloaded: 1,
            total: Some(0),
        };
        assert_eq!(progress.percentage(), None);
    }

    #[test]
    fn test_percentage_unknown_total() {
        let progress = DownloadProgress {
            downloaded: 4096,
            total: None,
        };
        assert_eq!(progress.percentage(), None);
    }

    #[test]
    fn test_percentage_capped_at_100() {
        // Body longer than the advertised Content-Length.
        let progress = DownloadProgress {
            downloaded: 1500,
            total: Some(1000),
        };
        assert_eq!(progress.percentage(), Some(100));
    }

    #[test]
    fn test_event_phases() {
        let event = UpdateEvent::Downloading(DownloadProgress {
            downloaded: 0,
            total: Some(10),
        });
        assert_eq!(event.phase(), UpdatePhase::Downloading);
        assert_eq!(event.percent(), Some(0));

        assert_eq!(UpdateEvent::Extracting.percent(), None);
        assert_eq!(UpdateEvent::Installed.percent(), Some(100));
        assert_eq!(UpdateEvent::Installed.phase().label(), "installed");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.0 GB");
    }
}
