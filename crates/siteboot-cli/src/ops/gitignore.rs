//! Ignore-file maintenance for the bootstrap directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Append `line` to the ignore file unless it already appears anywhere in
/// it. A missing file is treated as empty.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let current = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(error) => {
            return Err(error).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    if current.contains(line) {
        return Ok(());
    }

    fs::write(path, format!("{current}\n{line}"))
        .with_context(|| format!("Failed to update {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_file_with_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");

        append_line(&path, "node/").unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("node/"));
    }

    #[test]
    fn append_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");

        append_line(&path, "node/").unwrap();
        let once = fs::read_to_string(&path).unwrap();
        append_line(&path, "node/").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), once);
    }

    #[test]
    fn preserves_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, "target/\n").unwrap();

        append_line(&path, "node/").unwrap();
        append_line(&path, "jaoweb/").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("target/\n"));
        assert!(content.contains("node/"));
        assert!(content.contains("jaoweb/"));
    }
}
