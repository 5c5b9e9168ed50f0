//! Sequential driver over the resolved file list
//!
//! Files are processed strictly in the order given; the first failure stops
//! the run and every file after it stays `Pending`.

use crate::commit::{CommitOutcome, ReplacementCommitter};
use crate::config::Settings;
use crate::diff_formatter::DiffFormatter;
use crate::error::RetabError;
use crate::file_processor::{FileRewriter, RewriteResult};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Where a file is in its pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    Pending,
    Rewriting,
    Committing,
    Done(CommitOutcome),
    Failed,
}

#[derive(Debug, Clone)]
pub struct FileTask {
    pub path: PathBuf,
    pub state: FileState,
}

/// Per-file states after a run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub tasks: Vec<FileTask>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&FileState) -> bool) -> usize {
        self.tasks.iter().filter(|t| pred(&t.state)).count()
    }

    pub fn processed(&self) -> usize {
        self.count(|s| matches!(s, FileState::Done(_)))
    }

    pub fn changed(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                FileState::Done(CommitOutcome::Replaced | CommitOutcome::BackedUp { .. })
            )
        })
    }

    pub fn unchanged(&self) -> usize {
        self.count(|s| matches!(s, FileState::Done(CommitOutcome::Unchanged)))
    }

    pub fn would_change(&self) -> usize {
        self.count(|s| matches!(s, FileState::Done(CommitOutcome::WouldChange)))
    }

    pub fn pending(&self) -> usize {
        self.count(|s| *s == FileState::Pending)
    }
}

#[derive(Error, Debug)]
#[error("failed to process '{}'", .path.display())]
pub struct BatchError {
    pub path: PathBuf,
    pub report: BatchReport,
    #[source]
    pub source: RetabError,
}

pub struct BatchRunner<'a> {
    rewriter: FileRewriter<'a>,
    committer: ReplacementCommitter,
    dry_run: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            rewriter: FileRewriter::new(settings),
            committer: ReplacementCommitter::new(settings.keep_backup),
            dry_run: false,
        }
    }

    /// Preview changes as diffs instead of committing them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self.committer = self.committer.dry_run(dry_run);
        self
    }

    pub fn run<P: AsRef<Path>>(&self, files: &[P]) -> Result<BatchReport, BatchError> {
        let mut report = BatchReport {
            tasks: files
                .iter()
                .map(|p| FileTask {
                    path: p.as_ref().to_path_buf(),
                    state: FileState::Pending,
                })
                .collect(),
        };

        if report.tasks.is_empty() {
            warn!("No matching files");
            return Ok(report);
        }

        for index in 0..report.tasks.len() {
            let path = report.tasks[index].path.clone();
            match self.process(&path, &mut report.tasks[index].state) {
                Ok(outcome) => report.tasks[index].state = FileState::Done(outcome),
                Err(source) => {
                    report.tasks[index].state = FileState::Failed;
                    return Err(BatchError {
                        path,
                        report,
                        source,
                    });
                }
            }
        }

        info!(
            "{} file(s) processed: {} changed, {} unchanged",
            report.processed(),
            report.changed() + report.would_change(),
            report.unchanged()
        );
        Ok(report)
    }

    fn process(&self, path: &Path, state: &mut FileState) -> Result<CommitOutcome, RetabError> {
        info!("Processing file: {}", path.display());

        *state = FileState::Rewriting;
        let result = self.rewriter.rewrite(path)?;

        if self.dry_run && result.changed {
            self.preview(path, &result)?;
        }

        *state = FileState::Committing;
        self.committer.commit(path, result)
    }

    fn preview(&self, path: &Path, result: &RewriteResult) -> Result<(), RetabError> {
        let old = fs::read_to_string(path).map_err(|e| RetabError::io("read", path, e))?;
        let new = fs::read_to_string(result.scratch_path())
            .map_err(|e| RetabError::io("read", result.scratch_path(), e))?;
        print!(
            "{}",
            DiffFormatter::format_file_diff(
                &path.display().to_string(),
                &old,
                &new,
                DiffFormatter::should_use_color()
            )
        );
        Ok(())
    }
}
