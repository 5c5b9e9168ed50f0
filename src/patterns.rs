//! Glob expansion of command-line patterns into an ordered file list

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::path::PathBuf;
use tracing::debug;

/// Prefix that turns a pattern into an exclusion
pub const EXCLUDE_PREFIX: char = '!';

/// Wildcards never match a leading `.`; dotfiles are only picked up when
/// named outright
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand patterns in argument order, keeping regular files only
///
/// A file matched by more than one pattern appears once, at its first match.
/// A pattern starting with `!` removes every file collected so far that it
/// matches; a later pattern can add those files back.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        if let Some(excluded) = pattern.strip_prefix(EXCLUDE_PREFIX) {
            let exclude = Pattern::new(excluded)
                .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
            let before = files.len();
            files.retain(|path| !exclude.matches_path_with(path, MATCH_OPTIONS));
            debug!("Pattern '{}' excluded {} file(s)", pattern, before - files.len());
            continue;
        }

        let entries = glob::glob_with(pattern, MATCH_OPTIONS)
            .with_context(|| format!("Invalid file pattern: {}", pattern))?;

        let mut matched = 0usize;
        for entry in entries {
            let path = entry.with_context(|| format!("Failed to read match for pattern: {}", pattern))?;
            if !path.is_file() {
                continue;
            }
            matched += 1;
            if !files.contains(&path) {
                files.push(path);
            }
        }
        debug!("Pattern '{}' matched {} file(s)", pattern, matched);
    }

    Ok(files)
}
