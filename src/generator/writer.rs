use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, ScaffoldError};

/// Overwrite policy, chosen by who owns the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Developer-owned after first generation: an existing file is left alone
    CreateOnly,
    /// Machine-owned: always rewritten from scratch
    Replace,
}

/// What a write did (or would have done in a dry run)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Replaced,
    /// `CreateOnly` target already present; contents untouched
    AlreadyExists,
    WouldCreate,
    WouldReplace,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WriteOutcome::Created => "created",
            WriteOutcome::Replaced => "replaced",
            WriteOutcome::AlreadyExists => "already exists",
            WriteOutcome::WouldCreate => "would create",
            WriteOutcome::WouldReplace => "would replace",
        };
        f.write_str(label)
    }
}

/// Persists generated text
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `content` to `path` under `policy`, creating parent directories
    ///
    /// An existing `CreateOnly` target is reported as
    /// [`WriteOutcome::AlreadyExists`], never as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Write`] if a directory or the file cannot be
    /// created or written.
    pub fn write(&self, path: &Path, content: &str, policy: WritePolicy) -> Result<WriteOutcome> {
        let exists = path.exists();
        let outcome = match (policy, exists, self.dry_run) {
            (WritePolicy::CreateOnly, true, _) => {
                info!("⚠️  Skipping existing file: {} (already exists)", path.display());
                return Ok(WriteOutcome::AlreadyExists);
            }
            (_, false, true) => WriteOutcome::WouldCreate,
            (WritePolicy::Replace, true, true) => WriteOutcome::WouldReplace,
            (_, false, false) => WriteOutcome::Created,
            (WritePolicy::Replace, true, false) => WriteOutcome::Replaced,
        };

        if self.dry_run {
            info!("{outcome}: {}", path.display());
            debug!("{} bytes not written", content.len());
            return Ok(outcome);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ScaffoldError::write(parent, e))?;
        }
        fs::write(path, content).map_err(|e| ScaffoldError::write(path, e))?;
        info!("✅ {outcome}: {}", path.display());
        Ok(outcome)
    }
}
