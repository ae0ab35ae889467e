//! Browser and editor launch helpers. Both are best-effort: a desktop
//! that cannot open them does not stop the bootstrap.

use std::path::Path;
use std::process::Command;

use siteboot_core::platform::Platform;
use tracing::warn;

use crate::ops::prereq;

/// Open `url` in the default browser.
pub fn open_browser(platform: Platform, url: &str) {
    let spawned = match platform {
        Platform::Linux => Command::new("xdg-open").arg(url).spawn(),
        Platform::Darwin => Command::new("open").arg(url).spawn(),
        Platform::Windows => Command::new("rundll32")
            .args(["url.dll,FileProtocolHandler", url])
            .spawn(),
    };
    if let Err(error) = spawned {
        warn!(%error, %url, "could not open browser");
    }
}

/// Open the content checkout in the editor when one is installed.
pub fn open_editor(content_dir: &Path) {
    let Some(code) = prereq::optional_command("code") else {
        return;
    };
    if let Err(error) = Command::new(code).arg(content_dir).status() {
        warn!(%error, "could not launch editor");
    }
}
