//! Install command implementation
//!
//! The command has three modes:
//! - no mode flag: validate the script and show its status
//! - `--dry-run`: show what `--all` would do
//! - `--all`: run the install pipeline
//!
//! The install pipeline:
//! 1. Validate the source (exists, recognized suffix)
//! 2. Stage a hidden copy next to the source
//! 3. Inspect the copy, grant execute permission, compute the interpreter line
//! 4. Strip the suffix of the copy
//! 5. Copy the result to the install directory
//! 6. Remove the staged copy

use std::path::Path;

use tracing::debug;

use crate::cli::Cli;
use crate::config::{Config, ConfigOverrides};
use crate::error::Result;
use crate::installer::{InstallRequest, Installer};
use crate::ui;

/// Which part of the pipeline the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Status,
    DryRun,
    Install,
}

impl Mode {
    fn from_cli(cli: &Cli) -> Self {
        if cli.all {
            Mode::Install
        } else if cli.dry_run {
            Mode::DryRun
        } else {
            Mode::Status
        }
    }
}

/// Run the command for `filepath`
pub fn run(cli: &Cli, filepath: &Path) -> Result<()> {
    let config = Config::load(&ConfigOverrides {
        config_path: cli.config.clone(),
        install_dir: cli.install_dir.clone(),
    })?;
    let installer = Installer::new(&config);
    let mode = Mode::from_cli(cli);
    debug!(?mode, path = %filepath.display(), "running");

    if cli.keepsuffix {
        ui::display_warning("--keepsuffix is not supported yet; the suffix will be removed");
    }

    let request = InstallRequest {
        source: filepath,
        custom_name: cli.customname.as_deref(),
    };

    match mode {
        Mode::Status => {
            let status = installer.status(filepath)?;
            ui::display_status(filepath, &status);
        }
        Mode::DryRun => {
            let plan = installer.plan(request)?;
            ui::display_plan(&plan);
        }
        Mode::Install => {
            let report = installer.install(request)?;
            ui::display_report(&report);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;
    use crate::error::PyexError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_mode_from_cli() {
        assert_eq!(Mode::from_cli(&parse(&["pyex", "x.py"])), Mode::Status);
        assert_eq!(
            Mode::from_cli(&parse(&["pyex", "x.py", "--dry-run"])),
            Mode::DryRun
        );
        assert_eq!(Mode::from_cli(&parse(&["pyex", "x.py", "-a"])), Mode::Install);
    }

    #[test]
    fn test_run_install_mode() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("script.sh");
        fs::write(&source, "echo hi\n").unwrap();
        let bin = temp.path().join("bin");

        let cli = parse(&[
            "pyex",
            source.to_str().unwrap(),
            "--all",
            "--install-dir",
            bin.to_str().unwrap(),
        ]);
        run(&cli, &source).unwrap();

        assert_eq!(
            fs::read_to_string(bin.join("script")).unwrap(),
            "#!/bin/bash\n\necho hi\n"
        );
    }

    #[test]
    fn test_run_status_mode_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("script.py");
        fs::write(&source, "print(1)\n").unwrap();
        let bin = temp.path().join("bin");

        let cli = parse(&[
            "pyex",
            source.to_str().unwrap(),
            "--install-dir",
            bin.to_str().unwrap(),
        ]);
        run(&cli, &source).unwrap();

        assert!(!bin.exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_run_missing_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("missing.py");
        let cli = parse(&[
            "pyex",
            source.to_str().unwrap(),
            "--all",
            "--install-dir",
            temp.path().to_str().unwrap(),
        ]);

        let err = run(&cli, &source).unwrap_err();
        assert!(matches!(err, PyexError::MissingFile { .. }));
    }
}
