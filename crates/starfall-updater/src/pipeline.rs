//! Update pipeline orchestration.

use std::path::PathBuf;

use async_stream::stream;
use futures_util::{Stream, StreamExt};

use crate::config::LauncherConfig;
use crate::error::{Result, UpdateError};
use crate::events::UpdateEvent;
use crate::marker::VersionMarker;
use crate::state::{PipelineState, StateCell};
use crate::steps;

/// The launcher's update pipeline.
///
/// Holds the long-lived HTTP client shared by the version checker and the
/// installer, plus the single-flight state. Cloning is cheap; clones share
/// the same client and state.
#[derive(Debug, Clone)]
pub struct Updater {
    client: reqwest::Client,
    config: LauncherConfig,
    state: StateCell,
}

impl Updater {
    /// Create an updater with a fresh HTTP client.
    #[must_use]
    pub fn new(config: LauncherConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an updater reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: LauncherConfig) -> Self {
        Self {
            client,
            config,
            state: StateCell::default(),
        }
    }

    /// The configuration this updater runs with.
    #[must_use]
    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Current pipeline state, for UI reflection.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state.get()
    }

    /// Checks whether an update is available.
    ///
    /// Soft-fails to `false` on any error. The pipeline state reads
    /// `CheckingVersion` for the duration of the check unless an install is
    /// already in flight, in which case the check runs without touching it.
    pub async fn is_update_available(&self) -> bool {
        let guard = self.state.try_begin(PipelineState::CheckingVersion);
        let available = steps::check::is_update_available(&self.client, &self.config).await;
        if let Some(guard) = guard {
            guard.finish(PipelineState::Idle);
        }
        available
    }

    /// Downloads and installs the update, yielding ordered progress events.
    ///
    /// Phases run strictly in order: download events with non-decreasing
    /// percentages, one `Extracting` event, then `Installed` at completion.
    /// On failure the stream ends with a single `Err` item. The staged
    /// archive is removed in every case, success or failure. The remote
    /// version token is read once at the start of the run and written to
    /// the local marker at finalize.
    ///
    /// A second call while a run is in flight is a no-op: the returned
    /// stream yields nothing and performs no I/O.
    pub fn download_and_install(&self) -> impl Stream<Item = Result<UpdateEvent>> + Send + 'static {
        let client = self.client.clone();
        let config = self.config.clone();
        let state = self.state.clone();

        stream! {
            let Some(guard) = state.try_begin(PipelineState::Downloading) else {
                tracing::info!("Update pipeline already in flight, ignoring trigger");
                return;
            };

            // The token is read before the archive so the marker can never
            // record a newer version than the one actually installed. A
            // failed read skips the marker update at finalize.
            let token = match steps::check::fetch_remote_token(&client, &config.version_url()).await
            {
                Ok(token) => Some(token),
                Err(err) => {
                    tracing::warn!("Could not fetch version token before download: {}", err);
                    None
                }
            };

            // Removes the staged archive when dropped, so every exit from
            // this block cleans up, including error returns.
            let staged = StagedArchive::new(config.staging_path.clone());

            let download = steps::download::download_to_file(
                client.clone(),
                config.archive_url.clone(),
                staged.path.clone(),
            );
            futures_util::pin_mut!(download);

            while let Some(progress) = download.next().await {
                match progress {
                    Ok(progress) => yield Ok(UpdateEvent::Downloading(progress)),
                    Err(err) => {
                        yield Err(err);
                        return;
                    }
                }
            }

            guard.advance(PipelineState::Extracting);
            yield Ok(UpdateEvent::Extracting);

            let archive_path = staged.path.clone();
            let install_dir = config.install_dir.clone();
            let extracted = tokio::task::spawn_blocking(move || {
                steps::extract::extract_over(&archive_path, &install_dir)
            })
            .await
            .map_err(|err| UpdateError::Archive(format!("extraction task failed: {err}")));

            match extracted {
                Ok(Ok(())) => {}
                Ok(Err(err)) | Err(err) => {
                    yield Err(err);
                    return;
                }
            }

            guard.advance(PipelineState::Finalizing);
            if let Some(token) = token {
                persist_version_marker(&config, &token);
            }
            drop(staged);

            guard.finish(PipelineState::Succeeded);
            yield Ok(UpdateEvent::Installed);
        }
    }
}

/// Records the freshly installed version in the local marker.
///
/// Best-effort: a failure here leaves the next launch reporting an update
/// again, which is safe, so it is logged and not surfaced.
fn persist_version_marker(config: &LauncherConfig, token: &str) {
    let marker = VersionMarker::new(config.marker_path());
    if let Err(err) = marker.write(token) {
        tracing::warn!("Could not persist version marker: {}", err);
    } else {
        tracing::info!("Version marker updated to {}", token.trim_end());
    }
}

/// Staged archive file, removed on drop.
struct StagedArchive {
    path: PathBuf,
}

impl StagedArchive {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for StagedArchive {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed staged archive {:?}", self.path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!("Could not remove staged archive {:?}: {}", self.path, err);
            }
        }
    }
}
