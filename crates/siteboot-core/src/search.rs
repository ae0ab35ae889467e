//! Recursive search for an extracted runtime binary.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// First file under `root` (in walk order) whose file name ends with
/// `suffix`, as an absolute path. Directories never match; no match, or
/// a missing root, is `None` rather than an error.
///
/// There is no uniqueness guarantee across the tree: callers root the
/// search narrowly (a dedicated runtime directory) so at most one match
/// can exist.
pub fn find_by_suffix(root: &Path, suffix: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .map(|entry| {
            let path = entry.into_path();
            std::fs::canonicalize(&path).unwrap_or(path)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn finds_nested_binary_as_absolute_path() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("dist/bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("node"), b"#!").unwrap();

        let found = find_by_suffix(dir.path(), "node").unwrap();
        assert!(found.is_absolute());
        assert!(found.ends_with("dist/bin/node"));
    }

    #[test]
    fn directories_do_not_match() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("node")).unwrap();

        assert_eq!(find_by_suffix(dir.path(), "node"), None);
    }

    #[test]
    fn no_match_is_none_not_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), b"docs").unwrap();

        assert_eq!(find_by_suffix(dir.path(), "node"), None);
    }

    #[test]
    fn missing_root_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(find_by_suffix(&dir.path().join("absent"), "node"), None);
    }

    #[test]
    fn suffix_matches_the_file_name_only() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("node.exe"), b"MZ").unwrap();

        assert_eq!(find_by_suffix(dir.path(), "node"), None);
        assert!(find_by_suffix(dir.path(), "node.exe").is_some());
        assert!(find_by_suffix(dir.path(), ".exe").is_some());
    }
}
