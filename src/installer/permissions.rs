//! Execute permission handling

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ExecScope;
use crate::error::{self, Result};

/// Result of [`ensure_executable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    AlreadyExecutable,
    /// Execute bits were added; `mode` is the new permission mode
    Granted { mode: u32 },
}

/// Whether the owner execute bit is set
#[cfg(unix)]
pub fn is_executable(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| error::fs::read_failed(path, &e))?;
    Ok(metadata.permissions().mode() & 0o100 != 0)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> Result<bool> {
    fs::metadata(path).map_err(|e| error::fs::read_failed(path, &e))?;
    Ok(true)
}

/// Execute bits selected by `scope` that `path` does not carry yet
#[cfg(unix)]
pub fn missing_bits(path: &Path, scope: ExecScope) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| error::fs::read_failed(path, &e))?;
    Ok(scope.mode_bits() & !metadata.permissions().mode())
}

#[cfg(not(unix))]
pub fn missing_bits(path: &Path, _scope: ExecScope) -> Result<u32> {
    fs::metadata(path).map_err(|e| error::fs::read_failed(path, &e))?;
    Ok(0)
}

/// Add the execute bits selected by `scope`, keeping every other mode bit.
///
/// A file that already carries those bits is left alone.
#[cfg(unix)]
pub fn ensure_executable(path: &Path, scope: ExecScope) -> Result<PermissionOutcome> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| error::fs::read_failed(path, &e))?;
    let mut permissions = metadata.permissions();
    let mode = permissions.mode();
    let bits = scope.mode_bits();

    if mode & bits == bits {
        return Ok(PermissionOutcome::AlreadyExecutable);
    }

    let new_mode = mode | bits;
    permissions.set_mode(new_mode);
    fs::set_permissions(path, permissions)
        .map_err(|e| error::fs::permission_denied(path, &e))?;

    debug!(
        path = %path.display(),
        from = %format!("{:o}", mode & 0o7777),
        to = %format!("{:o}", new_mode & 0o7777),
        "granted execute permission"
    );
    Ok(PermissionOutcome::Granted {
        mode: new_mode & 0o7777,
    })
}

#[cfg(not(unix))]
pub fn ensure_executable(path: &Path, _scope: ExecScope) -> Result<PermissionOutcome> {
    fs::metadata(path).map_err(|e| error::fs::read_failed(path, &e))?;
    Ok(PermissionOutcome::AlreadyExecutable)
}
