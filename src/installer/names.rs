//! Command names and destination paths

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{self, PyexError, Result};

/// Result of [`strip_suffix`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuffixStrip {
    /// The file had no suffix; nothing was renamed
    Unchanged(PathBuf),
    /// The file was renamed to this suffix-less path
    Stripped(PathBuf),
}

impl SuffixStrip {
    pub fn path(&self) -> &Path {
        match self {
            SuffixStrip::Unchanged(path) | SuffixStrip::Stripped(path) => path,
        }
    }
}

/// Rename `path` in place to drop its suffix.
///
/// This is a filesystem rename; callers only use it on staged copies.
pub fn strip_suffix(path: &Path) -> Result<SuffixStrip> {
    if path.extension().is_none() {
        debug!(path = %path.display(), "file already has no suffix");
        return Ok(SuffixStrip::Unchanged(path.to_path_buf()));
    }

    let stripped = path.with_extension("");
    // fs::rename replaces an existing target
    if fs::symlink_metadata(&stripped).is_ok() {
        let occupied = io::Error::new(io::ErrorKind::AlreadyExists, "target already exists");
        return Err(error::fs::rename_failed(path, &stripped, &occupied));
    }
    fs::rename(path, &stripped).map_err(|e| error::fs::rename_failed(path, &stripped, &e))?;
    debug!(from = %path.display(), to = %stripped.display(), "removed suffix");
    Ok(SuffixStrip::Stripped(stripped))
}

/// Command name for `source`: its file name without the suffix
pub fn command_name(source: &Path) -> Result<&OsStr> {
    source.file_stem().ok_or_else(|| PyexError::MissingFile {
        path: source.display().to_string(),
    })
}

/// Reject custom names that would leave the install directory
pub fn validate_custom_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(PyexError::InvalidCustomName {
            name: name.to_string(),
        }),
    }
}

/// `install_dir/custom_name` when a custom name is given, else `install_dir/stripped_name`
pub fn resolve_destination(
    install_dir: &Path,
    stripped_name: &OsStr,
    custom_name: Option<&str>,
) -> PathBuf {
    match custom_name {
        Some(name) => install_dir.join(name),
        None => install_dir.join(stripped_name),
    }
}
