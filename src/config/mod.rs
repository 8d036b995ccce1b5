//! Configuration for pyex
//!
//! Resolution order, later wins:
//! 1. Built-in defaults (`~/bin`, `.py` and `.sh` kinds, owner-only execute bit)
//! 2. `config.yaml` from `--config` / `PYEX_CONFIG`, or the user config directory
//! 3. `--install-dir` / `PYEX_INSTALL_DIR`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, PyexError, Result};

pub mod file;
pub mod kinds;

pub use file::ConfigFile;
pub use kinds::SourceKindTable;

/// Directory name under the user's config directory
const CONFIG_DIR: &str = "pyex";

/// Config file name inside [`CONFIG_DIR`]
const CONFIG_FILE: &str = "config.yaml";

/// Default install directory under the user's home
const DEFAULT_BIN_DIR: &str = "bin";

/// Which execute bits the permission setter grants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecScope {
    /// `u+x`
    #[default]
    Owner,
    /// `u+x,g+x`
    Group,
    /// `u+x,g+x,o+x`
    All,
}

impl ExecScope {
    /// Mode bits added to the file's permissions
    pub fn mode_bits(self) -> u32 {
        match self {
            ExecScope::Owner => 0o100,
            ExecScope::Group => 0o110,
            ExecScope::All => 0o111,
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub install_dir: Option<PathBuf>,
}

/// Resolved configuration handed to the install pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub install_dir: PathBuf,
    pub kinds: SourceKindTable,
    pub exec_scope: ExecScope,
}

impl Config {
    /// Configuration with default kinds installing into `install_dir`
    #[cfg(test)]
    pub fn with_install_dir(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            kinds: SourceKindTable::default(),
            exec_scope: ExecScope::default(),
        }
    }

    /// Load configuration from defaults, the config file and overrides
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let file = match &overrides.config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(error::config::not_found(path));
                }
                Some(read_config_file(path)?)
            }
            None => match default_config_path() {
                Some(path) if path.is_file() => Some(read_config_file(&path)?),
                _ => None,
            },
        };

        Self::resolve(file.unwrap_or_default(), overrides.install_dir.clone())
    }

    /// Apply a parsed config file and an optional install dir override on top of the defaults
    pub fn resolve(file: ConfigFile, install_dir: Option<PathBuf>) -> Result<Self> {
        validate_kinds(&file)?;

        let mut kinds = SourceKindTable::default();
        kinds.merge(file.kinds);

        let install_dir = match install_dir.or(file.install_dir) {
            Some(dir) => expand_home(&dir)?,
            None => default_install_dir()?,
        };

        let config = Self {
            install_dir,
            kinds,
            exec_scope: file.exec_scope.unwrap_or_default(),
        };
        debug!(
            install_dir = %config.install_dir.display(),
            kinds = %config.kinds.describe(),
            exec_scope = ?config.exec_scope,
            "resolved configuration"
        );
        Ok(config)
    }
}

/// `<config dir>/pyex/config.yaml`, when the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    debug!(path = %path.display(), "reading config file");
    let content = fs::read_to_string(path).map_err(|e| error::config::read_failed(path, e))?;
    ConfigFile::from_yaml(&content).map_err(|e| error::config::parse_failed(path, e))
}

fn validate_kinds(file: &ConfigFile) -> Result<()> {
    for (suffix, directive) in &file.kinds {
        let valid_suffix = suffix.len() > 1
            && suffix.starts_with('.')
            && !suffix[1..].contains(['.', '/', '\\']);
        if !valid_suffix {
            return Err(error::config::invalid(format!(
                "kind '{suffix}' must be a single suffix starting with '.' (e.g. '.py')"
            )));
        }
        if !directive.starts_with("#!") || directive.contains('\n') {
            return Err(error::config::invalid(format!(
                "directive for '{suffix}' must be a single line starting with '#!'"
            )));
        }
    }
    Ok(())
}

fn default_install_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(PyexError::HomeDirUnavailable)?;
    Ok(home.join(DEFAULT_BIN_DIR))
}

/// Expand a leading `~` component to the home directory
fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(PyexError::HomeDirUnavailable)?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}
