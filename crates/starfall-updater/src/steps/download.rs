//! Streamed archive download with progress.

use std::path::PathBuf;

use async_stream::stream;
use futures_util::{Stream, StreamExt};
use tokio::io::AsyncWriteExt;

use crate::error::{Result, UpdateError};
use crate::events::DownloadProgress;

/// Downloads `url` into `dest`, yielding a progress event per received chunk.
///
/// The response body is never buffered whole: headers are awaited first and
/// the body is streamed chunk by chunk into the destination file. When the
/// server advertises a usable `Content-Length` each event carries a
/// floor-rounded percentage; a zero or missing length yields indeterminate
/// events. Percentages are non-decreasing by construction.
///
/// The caller owns `dest` and is responsible for removing it, including when
/// the stream ends with an error.
pub(crate) fn download_to_file(
    client: reqwest::Client,
    url: String,
    dest: PathBuf,
) -> impl Stream<Item = Result<DownloadProgress>> + Send + 'static {
    stream! {
        tracing::info!("Starting archive download from {}", url);

        let response = match client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                yield Err(err.into());
                return;
            }
        };

        let status = response.status();
        if !status.is_success() {
            yield Err(UpdateError::Network(format!(
                "download failed with status {status}"
            )));
            return;
        }

        // A zero Content-Length is treated the same as an absent one.
        let total = response.content_length().filter(|len| *len > 0);

        let mut file = match tokio::fs::File::create(&dest).await {
            Ok(file) => file,
            Err(err) => {
                yield Err(err.into());
                return;
            }
        };

        let mut downloaded: u64 = 0;
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    yield Err(UpdateError::Network(err.to_string()));
                    return;
                }
            };

            if let Err(err) = file.write_all(&chunk).await {
                yield Err(err.into());
                return;
            }

            downloaded += chunk.len() as u64;
            yield Ok(DownloadProgress { downloaded, total });
        }

        if let Err(err) = file.flush().await {
            yield Err(err.into());
            return;
        }

        tracing::info!(
            "Archive download complete: {}",
            crate::events::format_bytes(downloaded)
        );
    }
}
