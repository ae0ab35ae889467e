//! Up command - full bootstrap of the local documentation environment

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::sync::watch;
use tracing::{info, warn};

use siteboot_core::platform::Platform;
use siteboot_core::provision::Provisioner;
use siteboot_core::search;
use siteboot_core::watch::{MirrorMapping, MirrorWatcher, WatchPolicy};

use crate::Config;
use crate::ops::{gitignore, launch, prereq, repos, server};

/// Run the whole bootstrap, then supervise the dev server and the mirror
/// watcher until an interrupt or the server's own exit.
pub async fn up(config: &Config, owner: Option<String>) -> Result<()> {
    info!("checking required commands");
    prereq::require_command("git")?;

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let runtime_dir = cwd.join(&config.runtime_dir);
    let site_dir = cwd.join(&config.site_dir);

    info!("maintaining .gitignore exclusions");
    let ignore_file = cwd.join(".gitignore");
    for entry in [
        "siteboot*".to_string(),
        format!("{}/", config.runtime_dir.display()),
        format!("{}/", config.site_dir.display()),
    ] {
        gitignore::append_line(&ignore_file, &entry)?;
    }

    let platform = Platform::current()?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let client = Client::new();

    let provisioner = Provisioner::new(
        runtime_dir.clone(),
        config.manifest_url.clone(),
        config.dist_url.clone(),
        platform,
    );
    let provisioned = provisioner.provision(&client, shutdown_rx.clone()).await?;
    server::print_runtime_version(provisioned.path())?;

    repos::sync_site(&config.site_repo, &site_dir)?;
    repos::sync_content(&config.content_repo, &site_dir, owner)?;

    let npx_path = search::find_by_suffix(&runtime_dir, platform.npx_binary())
        .with_context(|| {
            format!(
                "Could not find {} under {}",
                platform.npx_binary(),
                runtime_dir.display()
            )
        })?;

    info!("installing site dependencies");
    server::install_dependencies(&npx_path, &site_dir)?;

    launch::open_browser(platform, &config.server_url);

    info!("starting development server");
    let mut dev_server = server::spawn_dev_server(&npx_path, &site_dir)?;

    launch::open_editor(&site_dir.join("content"));

    // The bootstrap directory is the watch root; the checkout, the
    // runtime tree, and VCS metadata never mirror back into content.
    let policy = WatchPolicy::new(
        cwd.clone(),
        vec![site_dir.clone(), runtime_dir, cwd.join(".git")],
    );
    let mapping = MirrorMapping::new(cwd, site_dir.join("content"));
    let watcher = tokio::spawn(MirrorWatcher::new(policy, mapping).run(shutdown_rx));

    let server_exit = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
            None
        }
        status = dev_server.wait() => {
            let status = status.context("Failed to wait on the development server")?;
            warn!(%status, "development server exited");
            status.code()
        }
    };

    shutdown_tx.send(true).ok();
    dev_server.start_kill().ok();
    dev_server.wait().await.ok();
    watcher.await.context("Mirror watcher task panicked")??;

    if let Some(code) = server_exit {
        if code != 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}
