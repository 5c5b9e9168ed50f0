//! Error helper functions for creating actionable error messages

use crate::batch::BatchError;
use crate::error::RetabError;
use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Create an enhanced error message for file permission issues
pub fn permission_error(path: &Path) -> String {
    let parent_dir = path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    format!(
        "Possible fixes:\n\
         1. Check file permissions: ls -l '{}'\n\
         2. The rewrite creates a scratch file next to the original, so the\n   \
            directory must be writable: chmod u+w '{}'",
        path.display(),
        parent_dir
    )
}

/// Create an enhanced error message for file not found issues
pub fn not_found_error(path: &Path) -> String {
    format!(
        "Possible fixes:\n\
         1. Check the file still exists: ls -l '{}'\n\
         2. Quote glob patterns so the shell does not expand them first",
        path.display()
    )
}

/// Hint for a failed batch, if the cause is one we can explain
pub fn hint_for(err: &BatchError) -> Option<String> {
    match &err.source {
        RetabError::ReplaceFailed { scratch, .. } => Some(format!(
            "The original file may now be missing. Rewritten content: '{}'",
            scratch.display()
        )),
        RetabError::InvalidLine { .. } | RetabError::InvalidWhitespaceCharacter { .. } => None,
        other => {
            let io_err = other.io_error()?;
            if is_permission_denied(io_err) {
                Some(permission_error(&err.path))
            } else if is_not_found(io_err) {
                Some(not_found_error(&err.path))
            } else {
                None
            }
        }
    }
}
