//! Display functions for script status, plans and install reports

use std::path::Path;

use console::Style;

use crate::installer::{FileStatus, InstallPlan, InstallReport, PermissionStep};

macro_rules! display_field {
    ($label:expr, $value:expr) => {
        println!("  {} {}", Style::new().bold().apply_to($label), $value)
    };
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// One-line description of a permission step
pub fn describe_permission(step: &PermissionStep) -> String {
    match step {
        PermissionStep::AlreadyExecutable => "already executable".to_string(),
        PermissionStep::Granted { mode } => format!("made executable ({mode:o})"),
        PermissionStep::Denied { .. } => "left non-executable (permission denied)".to_string(),
    }
}

/// Status of a script that has not been installed
pub fn display_status(path: &Path, status: &FileStatus) {
    println!("{}", Style::new().bold().yellow().apply_to(path.display()));
    display_field!("Kind:", &status.suffix);
    display_field!("Interpreter line:", yes_no(status.has_directive));
    display_field!("Executable:", yes_no(status.is_executable));
    println!(
        "{}",
        Style::new()
            .dim()
            .apply_to("Run again with --all to install it as a command.")
    );
}

/// What `--all` would do
pub fn display_plan(plan: &InstallPlan) {
    println!(
        "{} {}",
        Style::new().bold().cyan().apply_to("Dry run:"),
        plan.source.display()
    );
    if plan.grants_permission() {
        println!("  would make the file executable");
    }
    if plan.injects_directive() {
        println!("  would add the {} interpreter line", plan.status.suffix);
    }
    println!("  would remove the {} suffix", plan.status.suffix);
    display_field!("Destination:", plan.destination.display());
}

/// Result of a full install
pub fn display_report(report: &InstallReport) {
    if let PermissionStep::Denied { reason } = &report.permission {
        display_warning(reason);
    }
    println!(
        "{} {} {} {}",
        Style::new().bold().green().apply_to("Installed"),
        report.source.display(),
        Style::new().dim().apply_to("->"),
        Style::new().bold().apply_to(report.destination.display())
    );
    display_field!("Permission:", describe_permission(&report.permission));
    display_field!(
        "Interpreter line:",
        if report.directive_injected {
            "added"
        } else {
            "already present"
        }
    );
    display_field!(
        "Suffix:",
        if report.suffix_stripped {
            "removed"
        } else {
            "none"
        }
    );
}

pub fn display_warning(message: &str) {
    eprintln!(
        "{} {}",
        Style::new().bold().yellow().apply_to("Warning:"),
        message
    );
}
