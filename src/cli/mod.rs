//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use clap_complete::Shell;
use std::path::PathBuf;

/// PyEx - make scripts executable anywhere in the shell
#[derive(Parser, Debug)]
#[command(
    name = "pyex",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Automate making Bash and Python scripts ready for execution anywhere",
    long_about = "PyEx installs a script as a command: it makes a hidden copy next to the script, \
                  grants execute permission, adds the interpreter line, removes the suffix and \
                  copies the result to your bin directory. The original script is never modified.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  pyex script.py                      \x1b[90m# Show what pyex sees\x1b[0m\n   \
                  pyex script.py --all                \x1b[90m# Install as ~/bin/script\x1b[0m\n   \
                  pyex tool.sh --all -c mytool        \x1b[90m# Install as ~/bin/mytool\x1b[0m\n   \
                  pyex tool.sh --dry-run              \x1b[90m# Show what --all would do\x1b[0m\n"
)]
pub struct Cli {
    /// The path of the target script file
    #[arg(required_unless_present = "completions")]
    pub filepath: Option<PathBuf>,

    /// Make executable, check the interpreter line, remove the suffix and copy to the bin directory
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Keep the suffix of the file instead of removing it (not supported yet)
    #[arg(long, short = 'k')]
    pub keepsuffix: bool,

    /// An optional custom destination file name
    #[arg(long, short = 'c', value_name = "NAME")]
    pub customname: Option<String>,

    /// Show what --all would do without changing anything
    #[arg(long, short = 'n', conflicts_with = "all")]
    pub dry_run: bool,

    /// Directory commands are installed to (defaults to ~/bin)
    #[arg(long, value_name = "DIR", env = "PYEX_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/pyex/config.yaml)
    #[arg(long, value_name = "FILE", env = "PYEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", conflicts_with_all = ["filepath", "all", "dry_run"])]
    pub completions: Option<Shell>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
