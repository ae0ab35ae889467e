//! Archive extraction for the runtime distribution.
//!
//! Handles the two formats runtime releases ship in: gzip-compressed
//! tarballs and zip archives. The format is decided by the platform, not
//! by inspecting the archive.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;
use zip::ZipArchive;

use crate::platform::ArchiveFormat;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Archive entry escapes the destination: {0}")]
    PathEscape(PathBuf),

    #[error("Unsupported archive entry type: {0}")]
    UnsupportedEntryType(PathBuf),

    #[error("Archive error: {0}")]
    Archive(String),
}

/// Extract `archive` into `dest` using the given format.
pub fn extract(archive: &Path, dest: &Path, format: ArchiveFormat) -> Result<(), ExtractError> {
    match format {
        ArchiveFormat::TarGz => extract_tar_gz(archive, dest),
        ArchiveFormat::Zip => extract_zip(archive, dest),
    }
}

/// Join an entry name onto `dest`, rejecting names that would land
/// outside it (absolute paths, parent-directory segments).
fn sanitized_target(dest: &Path, name: &Path) -> Result<PathBuf, ExtractError> {
    let mut target = dest.to_path_buf();
    for component in name.components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            _ => return Err(ExtractError::PathEscape(name.to_path_buf())),
        }
    }
    Ok(target)
}

/// Extract a tar.gz archive: directories are created with the entry
/// mode, regular files are stream-copied, anything else is rejected.
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(io::BufReader::new(file));
    let mut tar = tar::Archive::new(decoder);

    fs::create_dir_all(dest)?;

    for entry in tar.entries()? {
        let mut entry = entry?;
        let entry_path = entry.path()?.into_owned();
        let target = sanitized_target(dest, &entry_path)?;
        let entry_type = entry.header().entry_type();

        if entry_type.is_dir() {
            fs::create_dir_all(&target)?;
            set_unix_mode(&target, entry.header().mode().ok());
        } else if entry_type.is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;
            io::copy(&mut entry, &mut out)?;
            set_unix_mode(&target, entry.header().mode().ok());
        } else {
            return Err(ExtractError::UnsupportedEntryType(entry_path));
        }
    }

    Ok(())
}

/// Extract a zip archive. File entries are fully decompressed into
/// memory before the write.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file).map_err(|e| ExtractError::Archive(e.to_string()))?;

    fs::create_dir_all(dest)?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| ExtractError::Archive(e.to_string()))?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(ExtractError::PathEscape(PathBuf::from(entry.name())));
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            set_unix_mode(&target, entry.unix_mode());
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buf)?;
        fs::write(&target, &buf)?;
        set_unix_mode(&target, entry.unix_mode());
    }

    Ok(())
}

#[cfg(unix)]
fn set_unix_mode(path: &Path, mode: Option<u32>) {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(mode));
    }
}

#[cfg(not(unix))]
fn set_unix_mode(_path: &Path, _mode: Option<u32>) {}
