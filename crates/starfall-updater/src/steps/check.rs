//! Version check against the update server.

use crate::config::LauncherConfig;
use crate::error::{Result, UpdateError};
use crate::marker::VersionMarker;

/// Fetches the remote version token.
pub(crate) async fn fetch_remote_token(
    client: &reqwest::Client,
    version_url: &str,
) -> Result<String> {
    tracing::debug!("Fetching remote version token from {}", version_url);

    let response = client.get(version_url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpdateError::Network(format!(
            "version fetch failed with status {status}"
        )));
    }

    Ok(response.text().await?)
}

/// Compares the local marker against the remote token.
///
/// Returns `true` when the marker is missing ("never installed") or when the
/// two tokens differ byte-for-byte. No semantic version parsing is done.
async fn check_update(client: &reqwest::Client, config: &LauncherConfig) -> Result<bool> {
    let marker = VersionMarker::new(config.marker_path());

    let Some(local_token) = marker.read()? else {
        tracing::info!("No local version marker, update required");
        return Ok(true);
    };

    let remote_token = fetch_remote_token(client, &config.version_url()).await?;

    if local_token == remote_token {
        tracing::info!("Already on latest version ({})", local_token.trim_end());
        Ok(false)
    } else {
        tracing::info!(
            "Update available: {} -> {}",
            local_token.trim_end(),
            remote_token.trim_end()
        );
        Ok(true)
    }
}

/// Checks whether an update is available, soft-failing to `false`.
///
/// The check never fails outward: on any error (network unreachable,
/// non-success status, unreadable marker) it logs the error and reports
/// "no update" so transient failures never block play.
pub async fn is_update_available(client: &reqwest::Client, config: &LauncherConfig) -> bool {
    match check_update(client, config).await {
        Ok(available) => available,
        Err(err) => {
            tracing::warn!("Update check failed, treating as up to date: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, install_dir: &std::path::Path) -> LauncherConfig {
        LauncherConfig::default()
            .with_archive_url(format!("{}/latest.zip", server.uri()))
            .with_install_dir(install_dir)
    }

    #[tokio::test]
    async fn test_missing_marker_means_update() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, dir.path());

        // Remote never consulted: absence alone forces the update.
        assert!(is_update_available(&reqwest::Client::new(), &config).await);
    }

    #[tokio::test]
    async fn test_differing_tokens_mean_update() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1.0.1"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, dir.path());
        std::fs::write(config.marker_path(), "1.0.0").unwrap();

        assert!(is_update_available(&reqwest::Client::new(), &config).await);
    }

    #[tokio::test]
    async fn test_equal_tokens_mean_no_update() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1.0.0"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, dir.path());
        std::fs::write(config.marker_path(), "1.0.0").unwrap();

        assert!(!is_update_available(&reqwest::Client::new(), &config).await);
    }

    #[tokio::test]
    async fn test_comparison_is_byte_for_byte() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1.0.0\n"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, dir.path());
        std::fs::write(config.marker_path(), "1.0.0").unwrap();

        // Trailing newline makes the tokens differ.
        assert!(is_update_available(&reqwest::Client::new(), &config).await);
    }

    #[tokio::test]
    async fn test_server_error_soft_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version.txt"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, dir.path());
        std::fs::write(config.marker_path(), "1.0.0").unwrap();

        assert!(!is_update_available(&reqwest::Client::new(), &config).await);
    }

    #[tokio::test]
    async fn test_unreachable_server_soft_fails() {
        let dir = tempfile::tempdir().unwrap();
        // Reserved TEST-NET-1 address, nothing listens here.
        let config = LauncherConfig::default()
            .with_archive_url("http://192.0.2.1:1/latest.zip")
            .with_install_dir(dir.path());
        std::fs::write(config.marker_path(), "1.0.0").unwrap();

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(500))
            .build()
            .unwrap();
        assert!(!is_update_available(&client, &config).await);
    }
}
