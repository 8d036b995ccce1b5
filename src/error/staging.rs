//! Staging errors

use std::fmt;
use std::io;
use std::path::Path;

use super::PyexError;

/// Why a staged copy could not be created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingCause {
    NotFound,
    PermissionDenied,
    /// The staging path is taken by another file
    AlreadyExists,
    Other,
}

impl From<io::ErrorKind> for StagingCause {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => StagingCause::NotFound,
            io::ErrorKind::PermissionDenied => StagingCause::PermissionDenied,
            io::ErrorKind::AlreadyExists => StagingCause::AlreadyExists,
            _ => StagingCause::Other,
        }
    }
}

impl fmt::Display for StagingCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StagingCause::NotFound => "source not found",
            StagingCause::PermissionDenied => "permission denied",
            StagingCause::AlreadyExists => "staged copy already exists",
            StagingCause::Other => "I/O error",
        };
        f.write_str(label)
    }
}

/// Creates a staging error from the I/O error that interrupted the copy
pub fn failed(path: &Path, err: &io::Error) -> PyexError {
    PyexError::StagingFailed {
        path: path.display().to_string(),
        cause: StagingCause::from(err.kind()),
        reason: err.to_string(),
    }
}
