//! Status inspection: source kind, interpreter directive and execute bit

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::SourceKindTable;
use crate::error::{self, PyexError, Result};

use super::permissions;

/// Snapshot of a script file at the moment it was inspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Recognized suffix including the leading dot
    pub suffix: String,
    /// First line equals the directive required for `suffix`
    pub has_directive: bool,
    /// Owner execute bit is set
    pub is_executable: bool,
}

/// Suffix of `path` with its leading dot (`.py`), or an empty string when there is none
pub fn suffix_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

pub fn unsupported_kind(suffix: &str, kinds: &SourceKindTable) -> PyexError {
    PyexError::UnsupportedKind {
        suffix: suffix.to_string(),
        supported: kinds.describe(),
    }
}

/// Inspect `path` without modifying it
pub fn inspect(path: &Path, kinds: &SourceKindTable) -> Result<FileStatus> {
    let suffix = suffix_of(path);
    let directive = kinds
        .directive_for(&suffix)
        .ok_or_else(|| unsupported_kind(&suffix, kinds))?;

    let first_line = read_first_line(path)?;

    Ok(FileStatus {
        has_directive: first_line == directive.as_bytes(),
        is_executable: permissions::is_executable(path)?,
        suffix,
    })
}

/// First line of the file as raw bytes, without the terminating `\n`
fn read_first_line(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| error::fs::read_failed(path, &e))?;
    let mut line = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut line)
        .map_err(|e| error::fs::read_failed(path, &e))?;
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    Ok(line)
}
