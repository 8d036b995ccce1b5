//! Terminal presentation layer
//!
//! Everything printed for the user goes through here, styled with `console`.
//! Diagnostics for developers go through `tracing` instead.

pub mod display;

pub use display::{display_plan, display_report, display_status, display_warning};
