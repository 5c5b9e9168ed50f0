//! Error types for retab
//!
//! Every failure inside a single file's pipeline is fatal for that file and
//! aborts the batch, so there is no recoverable/unrecoverable split here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetabError {
    /// Indentation contained something other than a space or a tab
    #[error("unexpected whitespace character {ch:?} in indentation")]
    InvalidWhitespaceCharacter { ch: char },

    /// A per-line failure, tagged with its 1-based line number
    #[error("line {line} of '{}'", .path.display())]
    InvalidLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<RetabError>,
    },

    /// Open/read/write/rename failure at any stage before the final replace
    #[error("failed to {action} '{}'", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scratch file could not be renamed over the original; it is left on disk
    #[error("failed to replace '{}' (rewritten content kept at '{}')", .path.display(), .scratch.display())]
    ReplaceFailed {
        path: PathBuf,
        scratch: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RetabError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        RetabError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// The underlying I/O error, if this failure was caused by one
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            RetabError::Io { source, .. } | RetabError::ReplaceFailed { source, .. } => Some(source),
            RetabError::InvalidLine { source, .. } => source.io_error(),
            RetabError::InvalidWhitespaceCharacter { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RetabError>;
