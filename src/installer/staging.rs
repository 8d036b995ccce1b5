//! Staged copies of source scripts
//!
//! A [`StagedFile`] is a hidden sibling of the source (`script.py` is staged as
//! `.script.py`) and is the only file the pipeline ever mutates. Staying in the
//! source's directory keeps the copy on the same filesystem.
//!
//! ## Usage
//!
//! ```ignore
//! let mut staged = staging::stage(Path::new("tools/script.py"))?;
//!
//! // Mutate staged.path()...
//! staged.strip_suffix()?;
//!
//! // On success:
//! staged.unstage()?;
//!
//! // On error (automatic via Drop if not unstaged):
//! // the staged copy is removed
//! ```

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{self, PyexError, Result};

use super::names::{self, SuffixStrip};

/// Prefix that hides the staged copy
pub const STAGING_MARKER: char = '.';

/// Path of the staged copy for `source`
pub fn staged_path_for(source: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| PyexError::MissingFile {
            path: source.display().to_string(),
        })?;

    let mut staged_name = STAGING_MARKER.to_string();
    staged_name.push_str(&file_name.to_string_lossy());
    Ok(source.with_file_name(staged_name))
}

/// Path the staged copy of `source` has once its suffix is stripped
pub fn stripped_staged_path_for(source: &Path) -> Result<PathBuf> {
    let staged = staged_path_for(source)?;
    Ok(match staged.extension() {
        Some(_) => staged.with_extension(""),
        None => staged,
    })
}

/// Copy `source` to its hidden staging path, keeping its permissions.
///
/// Fails when the staging path is already taken; an existing file there is never touched.
pub fn stage(source: &Path) -> Result<StagedFile> {
    let staged = staged_path_for(source)?;

    let mut reader = File::open(source).map_err(|e| error::staging::failed(source, &e))?;
    let permissions = reader
        .metadata()
        .map_err(|e| error::staging::failed(source, &e))?
        .permissions();
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&staged)
        .map_err(|e| error::staging::failed(source, &e))?;

    let copied = io::copy(&mut reader, &mut writer)
        .and_then(|_| fs::set_permissions(&staged, permissions));
    if let Err(e) = copied {
        drop(writer);
        // The file is ours, but may be truncated
        if let Err(remove_err) = fs::remove_file(&staged) {
            warn!(
                path = %staged.display(),
                error = %remove_err,
                "failed to remove partial staged file"
            );
        }
        return Err(error::staging::failed(source, &e));
    }

    debug!(source = %source.display(), staged = %staged.display(), "staged source file");
    Ok(StagedFile {
        path: staged,
        armed: true,
    })
}

/// Guard over a staged copy; removes the file on drop unless already unstaged
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    armed: bool,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strip the suffix of the staged copy, keeping the guard on the renamed file
    pub fn strip_suffix(&mut self) -> Result<SuffixStrip> {
        let outcome = names::strip_suffix(&self.path)?;
        if let SuffixStrip::Stripped(new_path) = &outcome {
            self.path.clone_from(new_path);
        }
        Ok(outcome)
    }

    /// Delete the staged copy
    pub fn unstage(mut self) -> Result<()> {
        self.armed = false;
        fs::remove_file(&self.path).map_err(|e| error::fs::write_failed(&self.path, &e))?;
        debug!(path = %self.path.display(), "removed staged file");
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "discarded staged file"),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to discard staged file"
            ),
        }
    }
}
