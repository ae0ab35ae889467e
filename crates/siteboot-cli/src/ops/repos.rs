//! Git synchronization of the site and content checkouts.
//!
//! git runs with inherited standard streams and an explicit working
//! directory per invocation; the bootstrap process never changes its own
//! current directory. Output is not parsed, only exit status matters,
//! and a failed sync is reported without aborting the bootstrap.

use std::io::Write as _;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

/// Clone the site checkout when missing, pull it otherwise.
pub fn sync_site(repo_url: &str, site_dir: &Path) -> Result<()> {
    if site_dir.exists() {
        info!(dir = %site_dir.display(), "updating site checkout");
        run_git(&["pull"], Some(site_dir))
    } else {
        info!(%repo_url, "cloning site checkout");
        let dest = site_dir.to_string_lossy();
        run_git(&["clone", repo_url, dest.as_ref()], None)
    }
}

/// Ensure the content checkout (the user's fork) is mounted at
/// `<site>/content` with the upstream remote configured.
///
/// A `content/` directory without VCS metadata is a leftover from the
/// site checkout itself and is replaced by the fork clone.
pub fn sync_content(upstream_url: &str, site_dir: &Path, owner: Option<String>) -> Result<()> {
    let content_dir = site_dir.join("content");
    if content_dir.join(".git").exists() {
        return Ok(());
    }

    if content_dir.exists() {
        info!(dir = %content_dir.display(), "removing stale content directory");
        std::fs::remove_dir_all(&content_dir)
            .with_context(|| format!("Failed to remove {}", content_dir.display()))?;
    }

    let owner = match owner {
        Some(owner) => owner,
        None => prompt_owner()?,
    };

    let fork = fork_url(upstream_url, &owner)?;
    info!(%fork, "cloning content fork");
    run_git(&["clone", &fork, "content"], Some(site_dir))?;
    run_git(&["remote", "add", "upstream", upstream_url], Some(&content_dir))
}

/// The fork lives under the user's account with the upstream repository
/// name.
fn fork_url(upstream_url: &str, owner: &str) -> Result<String> {
    let name = upstream_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .context("Content repository URL has no repository name")?;
    Ok(format!("https://github.com/{owner}/{name}"))
}

fn prompt_owner() -> Result<String> {
    println!("The content checkout is cloned from your fork (fork it on GitHub first).");
    print!("Your GitHub account name: ");
    std::io::stdout().flush()?;

    let mut owner = String::new();
    std::io::stdin()
        .read_line(&mut owner)
        .context("Failed to read account name")?;
    let owner = owner.trim().to_string();
    if owner.is_empty() {
        bail!("A GitHub account name is required to clone the content fork");
    }
    Ok(owner)
}

fn run_git(args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let status = command.status().context("Failed to run git")?;
    if !status.success() {
        warn!(args = args.join(" "), %status, "git exited with an error");
    }
    Ok(())
}
