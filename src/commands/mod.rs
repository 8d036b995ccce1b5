//! Command implementations
//!
//! - [`install`]: status, dry run and the install pipeline for one script
//! - [`completions`]: shell completion scripts

pub mod completions;
pub mod install;
