//! Runtime checks and development-server process management.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tokio::process::{Child, Command as TokioCommand};
use tracing::warn;

/// Print the provisioned runtime's version with inherited streams. A
/// failing check is reported but does not stop the bootstrap.
pub fn print_runtime_version(node_path: &Path) -> Result<()> {
    let status = Command::new(node_path)
        .arg("--version")
        .status()
        .with_context(|| format!("Failed to run {}", node_path.display()))?;
    if !status.success() {
        warn!(%status, "runtime version check failed");
    }
    Ok(())
}

/// Install the site's package dependencies. Non-zero exit is fatal: the
/// dev server cannot start on a half-installed dependency tree.
pub fn install_dependencies(npx_path: &Path, site_dir: &Path) -> Result<()> {
    let status = Command::new(npx_path)
        .args(["yarn", "install"])
        .current_dir(site_dir)
        .status()
        .context("Failed to run yarn install")?;
    if !status.success() {
        bail!("yarn install exited with {status}");
    }
    Ok(())
}

/// Spawn the development server as a supervised child sharing the
/// parent's standard streams. `kill_on_drop` keeps the child from
/// outliving shutdown on any exit path.
pub fn spawn_dev_server(npx_path: &Path, site_dir: &Path) -> Result<Child> {
    TokioCommand::new(npx_path)
        .args(["yarn", "dev"])
        .current_dir(site_dir)
        .env("NUXT_TELEMETRY_DISABLED", "1")
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .context("Failed to start the development server")
}
