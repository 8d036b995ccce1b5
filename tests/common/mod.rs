//! Common test utilities for pyex integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch area with a source directory, an install directory and an empty config file
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Where test scripts are written
    pub src: PathBuf,
    /// Passed as --install-dir
    pub bin: PathBuf,
    /// Passed as --config
    pub config: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let src = temp.path().join("src");
        fs::create_dir_all(&src).expect("Failed to create source directory");
        let config = temp.path().join("config.yaml");
        fs::write(&config, "").expect("Failed to write config file");
        let bin = temp.path().join("bin");
        Self {
            temp,
            src,
            bin,
            config,
        }
    }

    /// Write a script into the source directory
    pub fn write_script(&self, name: &str, content: &str) -> PathBuf {
        let path = self.src.join(name);
        fs::write(&path, content).expect("Failed to write script");
        path
    }

    #[allow(dead_code)]
    pub fn write_config(&self, content: &str) {
        fs::write(&self.config, content).expect("Failed to write config file");
    }

    /// Read an installed command
    #[allow(dead_code)]
    pub fn read_installed(&self, name: &str) -> String {
        fs::read_to_string(self.bin.join(name)).expect("Failed to read installed command")
    }

    #[allow(dead_code)]
    pub fn installed(&self, name: &str) -> bool {
        self.bin.join(name).exists()
    }

    /// Names of hidden files left in the source directory
    pub fn staged_leftovers(&self) -> Vec<String> {
        fs::read_dir(&self.src)
            .expect("Failed to read source directory")
            .filter_map(|entry| {
                let name = entry.ok()?.file_name().to_string_lossy().into_owned();
                name.starts_with('.').then_some(name)
            })
            .collect()
    }

    /// `pyex` isolated from the user's config and environment
    pub fn pyex(&self) -> Command {
        let mut cmd = pyex_cmd();
        cmd.env_remove("PYEX_INSTALL_DIR")
            .env_remove("PYEX_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--install-dir")
            .arg(&self.bin)
            .arg("--config")
            .arg(&self.config);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(deprecated)]
pub fn pyex_cmd() -> Command {
    Command::cargo_bin("pyex").expect("Failed to find pyex binary")
}

#[cfg(unix)]
#[allow(dead_code)]
pub fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("Failed to set mode");
}

#[cfg(unix)]
#[allow(dead_code)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .expect("Failed to read metadata")
        .permissions()
        .mode()
        & 0o7777
}
