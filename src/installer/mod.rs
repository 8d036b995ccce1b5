//! Script installation logic
//!
//! This module handles:
//! - Inspecting scripts (suffix, interpreter directive, execute bit)
//! - Injecting the interpreter directive
//! - Granting execute permission
//! - Staging, renaming and committing scripts to the install directory

pub mod directive;
pub mod inspect;
pub mod names;
pub mod permissions;
pub mod pipeline;
pub mod staging;

pub use inspect::FileStatus;
pub use pipeline::{InstallPlan, InstallReport, InstallRequest, Installer, PermissionStep};
