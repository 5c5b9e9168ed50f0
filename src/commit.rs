//! Backup and replacement of the original file
//!
//! Backup then replace is two independent renames. A crash between them
//! leaves the original at `<path>~` and the rewritten content in the scratch
//! file; nothing tries to roll that back.

use crate::error::{Result, RetabError};
use crate::file_processor::RewriteResult;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What happened to the original file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing changed; scratch file discarded
    Unchanged,
    /// Scratch file renamed over the original
    Replaced,
    /// Original moved to `backup`, then replaced
    BackedUp { backup: PathBuf },
    /// Would have changed, but this is a dry run
    WouldChange,
}

/// `<path>~`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push("~");
    PathBuf::from(name)
}

pub struct ReplacementCommitter {
    keep_backup: bool,
    dry_run: bool,
}

impl ReplacementCommitter {
    pub fn new(keep_backup: bool) -> Self {
        Self {
            keep_backup,
            dry_run: false,
        }
    }

    /// Discard every scratch file instead of committing it
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn commit(&self, original: &Path, result: RewriteResult) -> Result<CommitOutcome> {
        if !result.changed {
            info!("Unchanged: {}", original.display());
            return Ok(CommitOutcome::Unchanged);
        }

        if self.dry_run {
            info!("Would change: {}", original.display());
            return Ok(CommitOutcome::WouldChange);
        }

        let backup = if self.keep_backup {
            let backup = backup_path(original);
            info!("Renaming: {} -> {}", original.display(), backup.display());
            fs::rename(original, &backup)
                .map_err(|e| RetabError::io("back up", original, e))?;
            Some(backup)
        } else {
            None
        };

        info!("Renaming: {} -> {}", result.scratch_path().display(), original.display());
        if let Err(err) = result.scratch.persist(original) {
            let source = err.error;
            // Leave the rewritten content where the user can find it
            let scratch = match err.file.keep() {
                Ok((_, path)) => path,
                Err(keep_err) => keep_err.file.path().to_path_buf(),
            };
            return Err(RetabError::ReplaceFailed {
                path: original.to_path_buf(),
                scratch,
                source,
            });
        }
        debug!("Committed {}", original.display());

        Ok(match backup {
            Some(backup) => CommitOutcome::BackedUp { backup },
            None => CommitOutcome::Replaced,
        })
    }
}
