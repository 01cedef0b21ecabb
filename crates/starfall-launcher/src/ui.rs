//! Terminal status lines and progress reflection.

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use starfall_updater::{UpdateError, UpdateEvent, Updater, format_bytes};

/// Status line shown while the checker runs.
pub const STATUS_CHECKING: &str = "Checking for updates...";

/// Status line when no update is needed.
pub const STATUS_UP_TO_DATE: &str = "Game is up to date.";

/// Status line after a successful update.
pub const STATUS_UPDATED: &str = "Update installed.";

/// Runs the update pipeline, reflecting its events on a progress bar.
///
/// The bar is determinate during download when the archive size is known and
/// a spinner otherwise; extraction is always a spinner. The bar is cleared
/// in every case before returning.
pub async fn run_update(updater: &Updater) -> Result<(), UpdateError> {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{msg:12} [{bar:40}] {pos:>3}%")
            .expect("static template")
            .progress_chars("=> "),
    );
    bar.set_message("downloading");

    let mut events = std::pin::pin!(updater.download_and_install());
    let mut result = Ok(());

    while let Some(event) = events.next().await {
        match event {
            Ok(UpdateEvent::Downloading(progress)) => match progress.percentage() {
                Some(percent) => bar.set_position(u64::from(percent)),
                None => bar.set_message(format!("downloading {}", format_bytes(progress.downloaded))),
            },
            Ok(UpdateEvent::Extracting) => {
                bar.set_style(
                    ProgressStyle::with_template("{msg:12} {spinner}").expect("static template"),
                );
                bar.set_message("extracting");
                bar.enable_steady_tick(std::time::Duration::from_millis(100));
            }
            Ok(UpdateEvent::Installed) => {
                bar.set_message("installed");
            }
            Err(err) => {
                result = Err(err);
                break;
            }
        }
    }

    bar.finish_and_clear();
    result
}
