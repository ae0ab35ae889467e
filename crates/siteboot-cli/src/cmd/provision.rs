//! Provision command - runtime acquisition only

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::sync::watch;

use siteboot_core::platform::Platform;
use siteboot_core::provision::{Provisioned, Provisioner};

use crate::Config;

pub async fn provision(config: &Config) -> Result<()> {
    let platform = Platform::current()?;
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let provisioner = Provisioner::new(
        cwd.join(&config.runtime_dir),
        config.manifest_url.clone(),
        config.dist_url.clone(),
        platform,
    );
    let provisioned = provisioner.provision(&Client::new(), shutdown_rx).await?;

    match &provisioned {
        Provisioned::AlreadyPresent(path) => {
            println!("Runtime already present: {}", path.display());
        }
        Provisioned::Installed(path) => println!("Runtime installed: {}", path.display()),
    }
    Ok(())
}
