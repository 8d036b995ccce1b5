//! PyEx - make scripts executable anywhere in the shell
//!
//! Turns a Bash or Python script into a command on the search path: the script
//! is staged as a hidden copy, given execute permission and an interpreter
//! line, stripped of its suffix and copied to the install directory.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod installer;
mod logging;
mod ui;

use cli::Cli;
use error::PyexError;

fn report_error(err: &PyexError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match (cli.completions, cli.filepath.as_deref()) {
        (Some(shell), _) => commands::completions::run(shell, &mut std::io::stdout().lock()),
        (None, Some(filepath)) => commands::install::run(&cli, filepath),
        // clap requires one of the two
        (None, None) => Ok(()),
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}
