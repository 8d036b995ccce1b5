//! Install pipeline for scripts
//!
//! This module handles:
//! - Validation of the source before anything touches the disk
//! - Orchestration of the stages (Staged → Inspected → Decided → Renamed → Committed → CleanedUp)
//! - Dry-run planning without staging
//!
//! Each stage is its own type with a single transition to the next one. A
//! failing transition drops the stage, and with it the [`StagedFile`] guard,
//! which discards the staged copy.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Config, ExecScope, SourceKindTable};
use crate::error::{self, PyexError, Result};

use super::directive::{self, Injection, Line};
use super::inspect::{self, FileStatus};
use super::names::{self, SuffixStrip};
use super::permissions::{self, PermissionOutcome};
use super::staging::{self, StagedFile};

/// Pipeline states, used for logging and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Staged,
    Inspected,
    Decided,
    Renamed,
    Committed,
    CleanedUp,
    Aborted,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Staged => "staged",
            PipelineState::Inspected => "inspected",
            PipelineState::Decided => "decided",
            PipelineState::Renamed => "renamed",
            PipelineState::Committed => "committed",
            PipelineState::CleanedUp => "cleaned-up",
            PipelineState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// What happened to the execute permission of the staged copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionStep {
    AlreadyExecutable,
    Granted { mode: u32 },
    /// The change was rejected; the command is installed without it
    Denied { reason: String },
}

/// One install request
#[derive(Debug, Clone, Copy)]
pub struct InstallRequest<'a> {
    pub source: &'a Path,
    pub custom_name: Option<&'a str>,
}

/// Summary of a finished install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub permission: PermissionStep,
    pub directive_injected: bool,
    pub suffix_stripped: bool,
}

/// What a full run would do, computed without writing anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub status: FileStatus,
    /// Execute bits the configured scope would add
    pub missing_exec_bits: u32,
}

impl InstallPlan {
    pub fn grants_permission(&self) -> bool {
        self.missing_exec_bits != 0
    }

    pub fn injects_directive(&self) -> bool {
        !self.status.has_directive
    }
}

/// Runs the install pipeline against one configuration
pub struct Installer<'a> {
    config: &'a Config,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Check that `source` exists and has a recognized suffix. Nothing is staged.
    pub fn validate(&self, source: &Path) -> Result<String> {
        if !source.exists() {
            return Err(PyexError::MissingFile {
                path: source.display().to_string(),
            });
        }

        let suffix = inspect::suffix_of(source);
        if !self.config.kinds.contains(&suffix) {
            return Err(inspect::unsupported_kind(&suffix, &self.config.kinds));
        }
        Ok(suffix)
    }

    /// Inspect the source file itself; read-only
    pub fn status(&self, source: &Path) -> Result<FileStatus> {
        self.validate(source)?;
        inspect::inspect(source, &self.config.kinds)
    }

    /// Compute what [`Installer::install`] would do without staging or writing
    pub fn plan(&self, request: InstallRequest<'_>) -> Result<InstallPlan> {
        let status = self.status(request.source)?;
        let destination = self.destination_for(request)?;
        let missing_exec_bits =
            permissions::missing_bits(request.source, self.config.exec_scope)?;
        Ok(InstallPlan {
            source: request.source.to_path_buf(),
            destination,
            status,
            missing_exec_bits,
        })
    }

    /// Run the whole pipeline for `request`
    pub fn install(&self, request: InstallRequest<'_>) -> Result<InstallReport> {
        self.validate(request.source)?;
        let destination = self.destination_for(request)?;

        let mut reached = None;
        let result = self.run(request.source, &destination, &mut reached);
        if let Err(e) = &result {
            warn!(
                last_state = ?reached,
                state = %PipelineState::Aborted,
                error = %e,
                "install aborted"
            );
        }
        result
    }

    fn run(
        &self,
        source: &Path,
        destination: &Path,
        reached: &mut Option<PipelineState>,
    ) -> Result<InstallReport> {
        let staged = Staged::stage(source)?;
        *reached = Some(PipelineState::Staged);

        let inspected = staged.inspect(&self.config.kinds)?;
        *reached = Some(PipelineState::Inspected);

        let decided = inspected.decide(&self.config.kinds, self.config.exec_scope)?;
        *reached = Some(PipelineState::Decided);

        let renamed = decided.rename()?;
        *reached = Some(PipelineState::Renamed);

        let committed = renamed.commit(destination)?;
        *reached = Some(PipelineState::Committed);

        let report = committed.clean_up()?;
        *reached = Some(PipelineState::CleanedUp);

        info!(
            source = %report.source.display(),
            destination = %report.destination.display(),
            "installed"
        );
        Ok(report)
    }

    fn destination_for(&self, request: InstallRequest<'_>) -> Result<PathBuf> {
        if let Some(name) = request.custom_name {
            names::validate_custom_name(name)?;
        }
        let stripped = names::command_name(request.source)?;
        let destination =
            names::resolve_destination(&self.config.install_dir, stripped, request.custom_name);

        // The commit copies from the stripped staged file, so it must not be the target either
        let staged = staging::stripped_staged_path_for(request.source)?;
        if is_same_file(request.source, &destination)
            || same_location(request.source, &destination)
            || same_location(&staged, &destination)
        {
            return Err(PyexError::DestinationIsSource {
                path: destination.display().to_string(),
            });
        }
        Ok(destination)
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Same file name in the same directory; works for paths that do not exist yet
fn same_location(a: &Path, b: &Path) -> bool {
    a.file_name().is_some()
        && a.file_name() == b.file_name()
        && matches!(
            (canonical_parent(a), canonical_parent(b)),
            (Some(a), Some(b)) if a == b
        )
}

fn canonical_parent(path: &Path) -> Option<PathBuf> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::canonicalize(parent).ok()
}

/// Map the permission setter's outcome to a pipeline step.
///
/// A refused change is recorded as [`PermissionStep::Denied`]; any other error aborts.
fn permission_step(outcome: Result<PermissionOutcome>) -> Result<PermissionStep> {
    match outcome {
        Ok(PermissionOutcome::AlreadyExecutable) => Ok(PermissionStep::AlreadyExecutable),
        Ok(PermissionOutcome::Granted { mode }) => Ok(PermissionStep::Granted { mode }),
        Err(e @ PyexError::PermissionDenied { .. }) => {
            warn!(error = %e, "continuing without execute permission");
            Ok(PermissionStep::Denied {
                reason: e.to_string(),
            })
        }
        Err(e) => Err(e),
    }
}

/// The source has been copied to its hidden staging path
#[derive(Debug)]
pub struct Staged {
    source: PathBuf,
    file: StagedFile,
}

impl Staged {
    pub fn stage(source: &Path) -> Result<Self> {
        let file = staging::stage(source)?;
        debug!(state = %PipelineState::Staged, path = %file.path().display(), "stage");
        Ok(Self {
            source: source.to_path_buf(),
            file,
        })
    }

    #[cfg(test)]
    pub fn staged_path(&self) -> &Path {
        self.file.path()
    }

    pub fn inspect(self, kinds: &SourceKindTable) -> Result<Inspected> {
        let status = inspect::inspect(self.file.path(), kinds)?;
        debug!(state = %PipelineState::Inspected, ?status, "stage");
        Ok(Inspected {
            source: self.source,
            file: self.file,
            status,
        })
    }
}

/// The staged copy has been inspected
#[derive(Debug)]
pub struct Inspected {
    source: PathBuf,
    file: StagedFile,
    status: FileStatus,
}

impl Inspected {
    #[cfg(test)]
    pub fn status(&self) -> &FileStatus {
        &self.status
    }

    /// Make the staged copy executable if needed and compute injected lines if needed.
    ///
    /// A rejected permission change is recorded, not returned as an error.
    pub fn decide(self, kinds: &SourceKindTable, scope: ExecScope) -> Result<Decided> {
        let permission = permission_step(permissions::ensure_executable(self.file.path(), scope))?;

        let injected = if self.status.has_directive {
            None
        } else {
            let path = self.file.path();
            let content = fs::read(path).map_err(|e| error::fs::read_failed(path, &e))?;
            match directive::inject(directive::split_lines(&content), &self.status.suffix, kinds)? {
                Injection::Injected(lines) => Some(lines),
                Injection::Unchanged(_) => None,
            }
        };

        debug!(
            state = %PipelineState::Decided,
            permission = ?permission,
            inject_directive = injected.is_some(),
            "stage"
        );
        Ok(Decided {
            source: self.source,
            file: self.file,
            permission,
            injected,
        })
    }
}

/// Permission and directive decisions are made; injected lines are held in memory
#[derive(Debug)]
pub struct Decided {
    source: PathBuf,
    file: StagedFile,
    permission: PermissionStep,
    injected: Option<Vec<Line>>,
}

impl Decided {
    #[cfg(test)]
    pub fn permission(&self) -> &PermissionStep {
        &self.permission
    }

    #[cfg(test)]
    pub fn injected_lines(&self) -> Option<&[Line]> {
        self.injected.as_deref()
    }

    /// Strip the suffix of the staged copy
    pub fn rename(mut self) -> Result<Renamed> {
        let strip = self.file.strip_suffix()?;
        debug!(state = %PipelineState::Renamed, path = %strip.path().display(), "stage");
        Ok(Renamed {
            source: self.source,
            file: self.file,
            permission: self.permission,
            injected: self.injected,
            suffix_stripped: matches!(strip, SuffixStrip::Stripped(_)),
        })
    }
}

/// The staged copy carries its final name
#[derive(Debug)]
pub struct Renamed {
    source: PathBuf,
    file: StagedFile,
    permission: PermissionStep,
    injected: Option<Vec<Line>>,
    suffix_stripped: bool,
}

impl Renamed {
    #[cfg(test)]
    pub fn staged_path(&self) -> &Path {
        self.file.path()
    }

    /// Copy the staged file to `destination`, then write the injected text if there is any
    pub fn commit(self, destination: &Path) -> Result<Committed> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| error::fs::commit_failed(parent, &e))?;
        }

        fs::copy(self.file.path(), destination)
            .map_err(|e| error::fs::commit_failed(destination, &e))?;

        if let Some(lines) = &self.injected {
            fs::write(destination, directive::join_lines(lines))
                .map_err(|e| error::fs::commit_failed(destination, &e))?;
        }

        debug!(
            state = %PipelineState::Committed,
            destination = %destination.display(),
            "stage"
        );
        Ok(Committed {
            file: self.file,
            report: InstallReport {
                source: self.source,
                destination: destination.to_path_buf(),
                permission: self.permission,
                directive_injected: self.injected.is_some(),
                suffix_stripped: self.suffix_stripped,
            },
        })
    }
}

/// The destination holds the final command; only the staged copy remains
#[derive(Debug)]
pub struct Committed {
    file: StagedFile,
    report: InstallReport,
}

impl Committed {
    pub fn clean_up(self) -> Result<InstallReport> {
        self.file.unstage()?;
        debug!(state = %PipelineState::CleanedUp, "stage");
        Ok(self.report)
    }
}
