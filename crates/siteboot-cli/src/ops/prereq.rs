//! Required-command checks, run before any network or filesystem work.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("Required command not found: {0}")]
pub struct MissingRequiredCommand(pub String);

/// Resolve `name` on PATH or fail. Fatal at startup.
pub fn require_command(name: &str) -> Result<PathBuf, MissingRequiredCommand> {
    which::which(name).map_err(|_| MissingRequiredCommand(name.to_string()))
}

/// Resolve an optional helper; absence is not an error.
pub fn optional_command(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_command_is_missing() {
        let err = require_command("siteboot-no-such-command-xyz").unwrap_err();
        assert!(err.to_string().contains("siteboot-no-such-command-xyz"));
        assert!(optional_command("siteboot-no-such-command-xyz").is_none());
    }
}
