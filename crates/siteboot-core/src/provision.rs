//! Runtime provisioning: search first, download and extract on a miss.
//!
//! The pipeline runs once per process, strictly before the dev server
//! and the mirror watcher start. Every stage failure is fatal to the
//! bootstrap; nothing downstream can work without the runtime.

use std::path::{Path, PathBuf};

use reqwest::Client;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::io::download::{self, DownloadError};
use crate::io::extract::{self, ExtractError};
use crate::manifest::{Manifest, ManifestError, RuntimeArtifact};
use crate::platform::{Platform, PlatformError};
use crate::search;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No runtime binary under {dir} after extracting {archive}")]
    RuntimeNotFound { dir: PathBuf, archive: String },
}

/// How the runtime path was obtained. `AlreadyPresent` is the idempotent
/// short-circuit: it is reached without a single network request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned {
    AlreadyPresent(PathBuf),
    Installed(PathBuf),
}

impl Provisioned {
    pub fn path(&self) -> &Path {
        match self {
            Self::AlreadyPresent(path) | Self::Installed(path) => path,
        }
    }
}

/// Acquires the pinned runtime into a dedicated directory.
#[derive(Debug, Clone)]
pub struct Provisioner {
    runtime_dir: PathBuf,
    manifest_url: String,
    dist_base_url: String,
    platform: Platform,
}

impl Provisioner {
    pub fn new(
        runtime_dir: PathBuf,
        manifest_url: String,
        dist_base_url: String,
        platform: Platform,
    ) -> Self {
        Self {
            runtime_dir,
            manifest_url,
            dist_base_url,
            platform,
        }
    }

    /// Resolve the runtime binary, downloading and extracting only when
    /// the local search comes up empty.
    pub async fn provision(
        &self,
        client: &Client,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Provisioned, ProvisionError> {
        if let Some(existing) = self.search_runtime() {
            info!(path = %existing.display(), "runtime already provisioned");
            return Ok(Provisioned::AlreadyPresent(existing));
        }

        std::fs::create_dir_all(&self.runtime_dir)?;

        let artifact = self.resolve_artifact(client).await?;
        info!(url = %artifact.url, "downloading runtime archive");

        let archive_path = self.runtime_dir.join(&artifact.file_name);
        download::download_and_verify(
            client,
            &artifact.url,
            &archive_path,
            &artifact.sha256,
            shutdown,
        )
        .await?;

        debug!(archive = %archive_path.display(), "extracting runtime archive");
        extract::extract(
            &archive_path,
            &self.runtime_dir,
            self.platform.archive_format(),
        )?;

        match self.search_runtime() {
            Some(path) => {
                info!(path = %path.display(), "runtime installed");
                Ok(Provisioned::Installed(path))
            }
            None => Err(ProvisionError::RuntimeNotFound {
                dir: self.runtime_dir.clone(),
                archive: artifact.file_name,
            }),
        }
    }

    /// The Windows binary name is checked on every host so an already
    /// extracted Windows tree is recognized regardless of platform.
    fn search_runtime(&self) -> Option<PathBuf> {
        search::find_by_suffix(&self.runtime_dir, "node.exe")
            .or_else(|| search::find_by_suffix(&self.runtime_dir, self.platform.node_binary()))
    }

    async fn resolve_artifact(&self, client: &Client) -> Result<RuntimeArtifact, ProvisionError> {
        let suffix = self.platform.archive_suffix();
        debug!(%suffix, url = %self.manifest_url, "resolving artifact from checksum manifest");
        let raw = download::fetch_text(client, &self.manifest_url).await?;
        let manifest = Manifest::parse(&raw)?;
        let entry = manifest.select(suffix)?;
        Ok(RuntimeArtifact::new(entry, &self.dist_base_url))
    }
}
