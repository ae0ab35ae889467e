//! Checksum-manifest parsing and artifact selection.
//!
//! Runtime releases publish a plaintext SHASUMS file: one
//! `<sha256>  <filename>` pair per line, covering every artifact of the
//! release. The manifest is the single source of both the artifact
//! filename for a platform and the hash the download is verified against.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Malformed manifest line {line_no}: {line:?}")]
    Malformed { line_no: usize, line: String },

    #[error("No artifact matching suffix '{suffix}' in the manifest")]
    NoMatchingArtifact { suffix: String },
}

/// One well-formed manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub sha256: String,
    pub file_name: String,
}

/// Parsed checksum manifest, entries in input-line order.
///
/// Selection is first-match-wins, so the order must survive parsing.
#[derive(Debug, Clone)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse the raw manifest body.
    ///
    /// Each non-empty line splits on its first whitespace run into a hash
    /// and a filename, both trimmed. Any line that does not yield both
    /// tokens rejects the whole manifest: a truncated or HTML-wrapped
    /// response must surface as an error, not as silently missing
    /// entries.
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let mut entries = Vec::new();
        for (idx, raw_line) in raw.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || ManifestError::Malformed {
                line_no: idx + 1,
                line: line.to_string(),
            };
            let (hash, rest) = line.split_once(char::is_whitespace).ok_or_else(malformed)?;
            let file_name = rest.trim();
            if file_name.is_empty() {
                return Err(malformed());
            }
            entries.push(ManifestEntry {
                sha256: hash.trim().to_string(),
                file_name: file_name.to_string(),
            });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// First entry whose filename ends with `suffix`, in manifest order.
    pub fn select(&self, suffix: &str) -> Result<&ManifestEntry, ManifestError> {
        self.entries
            .iter()
            .find(|entry| entry.file_name.ends_with(suffix))
            .ok_or_else(|| ManifestError::NoMatchingArtifact {
                suffix: suffix.to_string(),
            })
    }
}

/// A selected, downloadable artifact. Built once the manifest match
/// succeeds and immutable from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeArtifact {
    pub file_name: String,
    pub url: String,
    pub sha256: String,
}

impl RuntimeArtifact {
    /// Pair a manifest entry with the dist base URL its file is served
    /// from.
    pub fn new(entry: &ManifestEntry, dist_base_url: &str) -> Self {
        Self {
            file_name: entry.file_name.clone(),
            url: format!("{}/{}", dist_base_url.trim_end_matches('/'), entry.file_name),
            sha256: entry.sha256.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
abc123  node-v14.17.0-darwin-x64.tar.gz
def456  node-v14.17.0-linux-x64.tar.gz
789abc  node-v14.17.0-win-x64.zip
";

    #[test]
    fn parses_every_line_in_order() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let entries = manifest.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].sha256, "abc123");
        assert_eq!(entries[0].file_name, "node-v14.17.0-darwin-x64.tar.gz");
        assert_eq!(entries[2].file_name, "node-v14.17.0-win-x64.zip");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let manifest = Manifest::parse("abc123  a.tar.gz\n\n\ndef456  b.zip\n").unwrap();
        assert_eq!(manifest.entries().len(), 2);
    }

    #[test]
    fn malformed_line_rejects_whole_manifest() {
        let err = Manifest::parse("abc123  a.tar.gz\njust-one-token\n").unwrap_err();
        match err {
            ManifestError::Malformed { line_no, line } => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "just-one-token");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn hash_only_line_is_malformed() {
        assert!(Manifest::parse("abc123   \n").is_err());
    }

    #[test]
    fn select_returns_first_match() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        // "darwin-x64.tar.gz" also ends with the plain linux suffix, and
        // sits first: first-match-wins means it is the one selected.
        let entry = manifest.select("x64.tar.gz").unwrap();
        assert_eq!(entry.file_name, "node-v14.17.0-darwin-x64.tar.gz");

        let entry = manifest.select("win-x64.zip").unwrap();
        assert_eq!(entry.sha256, "789abc");
    }

    #[test]
    fn select_with_no_match_fails_with_suffix() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let err = manifest.select("armv7l.tar.xz").unwrap_err();
        match err {
            ManifestError::NoMatchingArtifact { suffix } => assert_eq!(suffix, "armv7l.tar.xz"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn artifact_url_joins_base_and_filename() {
        let entry = ManifestEntry {
            sha256: "abc123".to_string(),
            file_name: "node-v14.17.0-linux-x64.tar.gz".to_string(),
        };
        let artifact = RuntimeArtifact::new(&entry, "https://nodejs.org/dist/latest-v14.x/");
        assert_eq!(
            artifact.url,
            "https://nodejs.org/dist/latest-v14.x/node-v14.17.0-linux-x64.tar.gz"
        );
        assert_eq!(artifact.sha256, "abc123");
    }
}
