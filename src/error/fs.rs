//! File system errors

use std::io;
use std::path::Path;

use super::PyexError;

pub fn read_failed(path: &Path, err: &io::Error) -> PyexError {
    PyexError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn write_failed(path: &Path, err: &io::Error) -> PyexError {
    PyexError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn rename_failed(from: &Path, to: &Path, err: &io::Error) -> PyexError {
    PyexError::RenameFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn commit_failed(path: &Path, err: &io::Error) -> PyexError {
    PyexError::CommitFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn permission_denied(path: &Path, err: &io::Error) -> PyexError {
    PyexError::PermissionDenied {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
