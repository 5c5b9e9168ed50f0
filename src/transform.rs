//! Per-line re-indentation
//!
//! The new indentation is always rebuilt from the measured column width, never
//! edited in place, which is what makes [`transform_line`] idempotent.

use crate::config::Settings;
use crate::error::Result;
use crate::whitespace::{leading_whitespace, whitespace_width};

/// A transformed line and whether it differs from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub line: String,
    pub changed: bool,
}

/// Canonical indentation for a given column width
pub fn build_indent(width: usize, settings: &Settings) -> String {
    let n = settings.tab_width.get();
    if settings.use_tabs {
        let mut indent = "\t".repeat(width / n);
        indent.push_str(&" ".repeat(width % n));
        indent
    } else {
        " ".repeat(width)
    }
}

/// Re-indent one line (without its terminator)
pub fn transform_line(line: &str, settings: &Settings) -> Result<LineOutcome> {
    let (ws, rest) = leading_whitespace(line);
    let width = whitespace_width(ws, settings.tab_width)?;

    let mut result = build_indent(width, settings);
    result.push_str(rest);

    if settings.trim_trailing {
        let trimmed_len = result.trim_end_matches([' ', '\t']).len();
        result.truncate(trimmed_len);
    }

    let changed = result != line;
    Ok(LineOutcome {
        line: result,
        changed,
    })
}
