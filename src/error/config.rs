//! Configuration errors

use std::path::Path;

use super::PyexError;

pub fn not_found(path: &Path) -> PyexError {
    PyexError::ConfigNotFound {
        path: path.display().to_string(),
    }
}

pub fn read_failed(path: &Path, reason: impl ToString) -> PyexError {
    PyexError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn parse_failed(path: &Path, reason: impl ToString) -> PyexError {
    PyexError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn invalid(message: impl Into<String>) -> PyexError {
    PyexError::ConfigInvalid {
        message: message.into(),
    }
}
