//! Column-width arithmetic for leading whitespace

use crate::error::{Result, RetabError};
use std::num::NonZeroUsize;
use std::sync::LazyLock;

use regex::Regex;

static LEADING_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*").unwrap());

/// Split a line into its leading `[ \t]*` run and the remainder
pub fn leading_whitespace(line: &str) -> (&str, &str) {
    // The pattern can match the empty string, so it always matches
    let end = LEADING_WS_RE.find(line).map_or(0, |m| m.end());
    line.split_at(end)
}

/// Visual width of a whitespace run at the given tab width
///
/// Spaces count one column each; a tab advances to the next multiple of
/// `tab_width`. Any other character is rejected.
pub fn whitespace_width(ws: &str, tab_width: NonZeroUsize) -> Result<usize> {
    let n = tab_width.get();
    let mut count = 0usize;
    for ch in ws.chars() {
        match ch {
            ' ' => count += 1,
            '\t' => {
                count += n;
                count -= count % n;
            }
            other => return Err(RetabError::InvalidWhitespaceCharacter { ch: other }),
        }
    }
    Ok(count)
}
