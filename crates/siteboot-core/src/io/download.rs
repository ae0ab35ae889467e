//! Streaming artifact download with SHA-256 verification.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::watch;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("Download cancelled by shutdown")]
    Cancelled,
}

/// Fetch a small plaintext resource (the checksum manifest) into memory.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, DownloadError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.text().await?)
}

/// Download `url` to `dest`, hashing the body while it streams and
/// verifying it against `expected_sha256` (hex, case-insensitive).
///
/// On mismatch or cancellation the destination file is removed; after any
/// other failure the file is in an undefined, possibly partial state and
/// must not be trusted. No retries, no resume.
pub async fn download_and_verify(
    client: &Client,
    url: &str,
    dest: &Path,
    expected_sha256: &str,
    mut shutdown: watch::Receiver<bool>,
) -> Result<String, DownloadError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut hasher = Sha256::new();

    loop {
        let next = tokio::select! {
            next = stream.next() => next,
            _ = shutdown.changed() => {
                drop(file);
                tokio::fs::remove_file(dest).await.ok();
                return Err(DownloadError::Cancelled);
            }
        };
        let Some(chunk) = next else { break };
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        hasher.update(&chunk);
    }

    file.flush().await?;
    let actual = hex::encode(hasher.finalize());

    if !actual.eq_ignore_ascii_case(expected_sha256) {
        tokio::fs::remove_file(dest).await.ok();
        return Err(DownloadError::HashMismatch {
            expected: expected_sha256.to_string(),
            actual,
        });
    }

    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    // sha256("hello")
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn idle_shutdown() -> (watch::Sender<bool>, watch::Receiver<bool>) {
        watch::channel(false)
    }

    #[tokio::test]
    async fn downloads_and_verifies_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/artifact.tar.gz")
            .with_body("hello")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("artifact.tar.gz");
        let (_tx, shutdown) = idle_shutdown();

        let url = format!("{}/artifact.tar.gz", server.url());
        let actual = download_and_verify(&Client::new(), &url, &dest, HELLO_SHA256, shutdown)
            .await
            .unwrap();

        assert_eq!(actual, HELLO_SHA256);
        assert_eq!(std::fs::read(&dest).unwrap(), b"hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn hash_mismatch_removes_the_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/artifact.tar.gz")
            .with_body("tampered")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("artifact.tar.gz");
        let (_tx, shutdown) = idle_shutdown();

        let url = format!("{}/artifact.tar.gz", server.url());
        let err = download_and_verify(&Client::new(), &url, &dest, HELLO_SHA256, shutdown)
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::HashMismatch { .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.tar.gz")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing.tar.gz");
        let (_tx, shutdown) = idle_shutdown();

        let url = format!("{}/missing.tar.gz", server.url());
        let err = download_and_verify(&Client::new(), &url, &dest, HELLO_SHA256, shutdown)
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::Http(_)));
    }

    #[tokio::test]
    async fn fetch_text_returns_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/SHASUMS256.txt")
            .with_body("abc123  file.tar.gz\n")
            .create_async()
            .await;

        let url = format!("{}/SHASUMS256.txt", server.url());
        let body = fetch_text(&Client::new(), &url).await.unwrap();
        assert_eq!(body, "abc123  file.tar.gz\n");
    }
}
