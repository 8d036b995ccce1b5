//! Error types and handling for pyex
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors
//! - [`staging`]: Staging failures and their causes

pub mod config;
pub mod fs;
pub mod staging;


pub use staging::StagingCause;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pyex operations
#[derive(Error, Diagnostic, Debug)]
pub enum PyexError {
    // Input errors
    #[error("Specified file path does not exist: {path}")]
    #[diagnostic(code(pyex::input::missing_file))]
    MissingFile { path: String },

    #[error("'{suffix}' is an invalid suffix, must be one of these: {supported}")]
    #[diagnostic(
        code(pyex::input::unsupported_kind),
        help("Add the suffix and its interpreter line under `kinds` in the pyex config file")
    )]
    UnsupportedKind { suffix: String, supported: String },

    #[error("Invalid custom name '{name}'")]
    #[diagnostic(
        code(pyex::input::invalid_custom_name),
        help("A custom name is a plain file name without directory separators")
    )]
    InvalidCustomName { name: String },

    // Pipeline errors
    #[error("Failed to stage {path} ({cause}): {reason}")]
    #[diagnostic(
        code(pyex::staging::failed),
        help("The original file was not modified. A leftover hidden copy next to it must be removed by hand")
    )]
    StagingFailed {
        path: String,
        cause: StagingCause,
        reason: String,
    },

    #[error("Permission denied: unable to make {path} executable: {reason}")]
    #[diagnostic(code(pyex::permissions::denied))]
    PermissionDenied { path: String, reason: String },

    #[error("No interpreter directive is known for suffix '{suffix}'")]
    #[diagnostic(
        code(pyex::directive::misuse),
        help("This is a bug in pyex: the suffix should have been validated before injection")
    )]
    DirectiveInjectorMisuse { suffix: String },

    #[error("Failed to rename {from} to {to}: {reason}")]
    #[diagnostic(code(pyex::fs::rename_failed))]
    RenameFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to install to {path}: {reason}")]
    #[diagnostic(
        code(pyex::install::commit_failed),
        help("Check that the install directory exists and is writable")
    )]
    CommitFailed { path: String, reason: String },

    #[error("Destination {path} is the source file itself")]
    #[diagnostic(
        code(pyex::install::destination_is_source),
        help("Pick a different --customname or install directory")
    )]
    DestinationIsSource { path: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(pyex::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(pyex::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pyex::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(pyex::config::not_found),
        help("Pass an existing file with --config or unset PYEX_CONFIG")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(pyex::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(pyex::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(pyex::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(pyex::config::no_home),
        help("Set install_dir in the config file or pass --install-dir")
    )]
    HomeDirUnavailable,
}

impl From<std::io::Error> for PyexError {
    fn from(err: std::io::Error) -> Self {
        PyexError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PyexError>;
