//! Host platform detection and artifact naming.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Unsupported platform: {0}")]
    Unsupported(String),
}

/// Archive container format of a runtime distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Gzip-compressed tarball (Linux and macOS distributions).
    TarGz,
    /// Zip archive (Windows distributions).
    Zip,
}

/// Host platform the runtime is provisioned for.
///
/// The platform decides three things: which artifact in the checksum
/// manifest to download, how to unpack it, and which binary names to
/// search for afterwards.
///
/// # Example
///
/// ```
/// use siteboot_core::platform::Platform;
///
/// let platform: Platform = "linux".parse().unwrap();
/// assert_eq!(platform.archive_suffix(), "x64.tar.gz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux on `x86_64`.
    Linux,
    /// macOS on `x86_64`.
    Darwin,
    /// Windows on `x86_64`.
    Windows,
}

impl Platform {
    /// Detect the platform of the running process.
    pub fn current() -> Result<Self, PlatformError> {
        match std::env::consts::OS {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Darwin),
            "windows" => Ok(Self::Windows),
            other => Err(PlatformError::Unsupported(other.to_string())),
        }
    }

    /// Filename suffix of this platform's artifact in the checksum
    /// manifest.
    pub fn archive_suffix(self) -> &'static str {
        match self {
            Self::Linux => "x64.tar.gz",
            Self::Darwin => "darwin-x64.tar.gz",
            Self::Windows => "win-x64.zip",
        }
    }

    /// Container format of this platform's artifact. Selected here, by
    /// platform, never by sniffing archive magic bytes.
    pub fn archive_format(self) -> ArchiveFormat {
        match self {
            Self::Linux | Self::Darwin => ArchiveFormat::TarGz,
            Self::Windows => ArchiveFormat::Zip,
        }
    }

    /// Name of the runtime binary inside the extracted distribution.
    pub fn node_binary(self) -> &'static str {
        match self {
            Self::Linux | Self::Darwin => "node",
            Self::Windows => "node.exe",
        }
    }

    /// Name of the package-runner binary inside the extracted
    /// distribution.
    pub fn npx_binary(self) -> &'static str {
        match self {
            Self::Linux | Self::Darwin => "npx",
            Self::Windows => "npx.cmd",
        }
    }

    /// String representation, matching the host identifiers accepted by
    /// [`FromStr`](std::str::FromStr).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Self::Linux),
            "darwin" | "macos" => Ok(Self::Darwin),
            "windows" => Ok(Self::Windows),
            other => Err(PlatformError::Unsupported(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hosts_resolve_to_their_suffix() {
        let cases = [
            ("linux", "x64.tar.gz"),
            ("darwin", "darwin-x64.tar.gz"),
            ("windows", "win-x64.zip"),
        ];
        for (host, suffix) in cases {
            let platform: Platform = host.parse().unwrap();
            assert_eq!(platform.archive_suffix(), suffix);
        }
    }

    #[test]
    fn unknown_host_is_rejected() {
        assert!("plan9".parse::<Platform>().is_err());
        assert!("".parse::<Platform>().is_err());
    }

    #[test]
    fn format_follows_platform() {
        assert_eq!(Platform::Windows.archive_format(), ArchiveFormat::Zip);
        assert_eq!(Platform::Linux.archive_format(), ArchiveFormat::TarGz);
        assert_eq!(Platform::Darwin.archive_format(), ArchiveFormat::TarGz);
    }

    #[test]
    fn current_resolves_on_supported_hosts() {
        assert!(Platform::current().is_ok());
    }

    #[test]
    fn display_round_trips() {
        for platform in [Platform::Linux, Platform::Darwin, Platform::Windows] {
            assert_eq!(platform.to_string().parse::<Platform>().unwrap(), platform);
        }
    }
}
