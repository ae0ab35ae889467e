//! Watch command - mirror watcher only

use anyhow::{Context, Result, ensure};
use tokio::sync::watch;
use tracing::info;

use siteboot_core::watch::{MirrorMapping, MirrorWatcher, WatchPolicy};

use crate::Config;

pub async fn watch(config: &Config) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let site_dir = cwd.join(&config.site_dir);
    ensure!(
        site_dir.exists(),
        "Site checkout {} does not exist; run `siteboot up` first",
        site_dir.display()
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let policy = WatchPolicy::new(
        cwd.clone(),
        vec![
            site_dir.clone(),
            cwd.join(&config.runtime_dir),
            cwd.join(".git"),
        ],
    );
    let mapping = MirrorMapping::new(cwd, site_dir.join("content"));
    let watcher = tokio::spawn(MirrorWatcher::new(policy, mapping).run(shutdown_rx));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for interrupt")?;
    info!("interrupt received, stopping watcher");

    shutdown_tx.send(true).ok();
    watcher.await.context("Mirror watcher task panicked")??;
    Ok(())
}
