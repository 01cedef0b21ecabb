//! Update pipeline for the Starfall launcher.
//!
//! This crate implements everything between "is the installed game current?"
//! and "the new version is on disk": a version check against the update
//! server, a streamed archive download with progress reporting, in-place
//! extraction over the installation directory, and the bookkeeping around
//! them (version marker, staged-archive cleanup, single-flight guard).
//!
//! # Overview
//!
//! The update server exposes two URLs next to each other: the archive itself
//! and a `version.txt` holding an opaque version token. The local
//! installation keeps the token of the installed version in its own
//! `version.txt`. The checker compares the two byte-for-byte; the installer
//! streams the archive to a staging file, extracts it over the installation
//! directory, rewrites the local token, and removes the staging file.
//!
//! # Architecture
//!
//! [`Updater`] is the facade the launcher shell talks to:
//!
//! - [`Updater::is_update_available`] - one-shot async check; never fails
//!   outward, soft-failing to "no update" on any error
//! - [`Updater::download_and_install`] - returns an ordered stream of
//!   [`UpdateEvent`]s: download progress, extraction, completion
//! - [`launch_game`] - starts the installed executable detached
//!
//! The pipeline is strictly sequential (the download completes before
//! extraction starts) and single-flight: triggering it while a run is in
//! flight is a no-op. Its state is observable through [`Updater::state`].
//!
//! # Example
//!
//! ```no_run
//! use futures_util::StreamExt;
//! use starfall_updater::{LauncherConfig, Updater};
//!
//! async fn update() -> starfall_updater::Result<()> {
//!     let updater = Updater::new(LauncherConfig::default());
//!
//!     if updater.is_update_available().await {
//!         let mut events = std::pin::pin!(updater.download_and_install());
//!         while let Some(event) = events.next().await {
//!             let event = event?;
//!             println!("{}: {:?}", event.phase(), event.percent());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod events;
pub mod launch;
pub mod marker;
pub mod pipeline;
pub mod state;

mod steps;

pub use config::{LauncherConfig, VERSION_FILE};
pub use error::{Result, UpdateError};
pub use events::{DownloadProgress, UpdateEvent, UpdatePhase, format_bytes};
pub use launch::launch_game;
pub use marker::VersionMarker;
pub use pipeline::Updater;
pub use state::PipelineState;
