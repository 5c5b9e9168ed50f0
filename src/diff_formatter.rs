//! Unified diff output for dry runs

use colored::*;
use similar::{ChangeTag, TextDiff};
use std::io::IsTerminal;

pub struct DiffFormatter;

impl DiffFormatter {
    /// Auto-detect if we should use colors
    pub fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        std::io::stdout().is_terminal()
    }

    /// Whitespace is the whole point of the diff, so make it visible
    fn visible(text: &str) -> String {
        text.replace('\t', "→   ")
    }

    /// Unified diff of a file's current and rewritten content
    pub fn format_file_diff(file_path: &str, old: &str, new: &str, use_color: bool) -> String {
        let diff = TextDiff::from_lines(old, new);
        let mut output = String::new();

        let header = format!("--- {}\n+++ {} (retab)\n", file_path, file_path);
        if use_color {
            output.push_str(&header.bold().cyan().to_string());
        } else {
            output.push_str(&header);
        }

        let mut changed = 0usize;
        for group in diff.grouped_ops(1) {
            let (first, last) = match (group.first(), group.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => continue,
            };
            let old_range = first.old_range().start..last.old_range().end;
            let new_range = first.new_range().start..last.new_range().end;
            let hunk = format!(
                "@@ -{},{} +{},{} @@\n",
                old_range.start + 1,
                old_range.len(),
                new_range.start + 1,
                new_range.len()
            );
            if use_color {
                output.push_str(&hunk.dimmed().to_string());
            } else {
                output.push_str(&hunk);
            }

            for op in &group {
                for change in diff.iter_changes(op) {
                    let content = Self::visible(change.value().trim_end_matches(['\r', '\n']));
                    let line = match change.tag() {
                        ChangeTag::Equal => format!(" {}", content),
                        ChangeTag::Delete => format!("-{}", content),
                        ChangeTag::Insert => {
                            changed += 1;
                            format!("+{}", content)
                        }
                    };
                    if use_color {
                        let colored_line = match change.tag() {
                            ChangeTag::Equal => line.dimmed(),
                            ChangeTag::Delete => line.red(),
                            ChangeTag::Insert => line.green().bold(),
                        };
                        output.push_str(&format!("{}\n", colored_line));
                    } else {
                        output.push_str(&line);
                        output.push('\n');
                    }
                }
            }
        }

        let plural = if changed == 1 { "" } else { "s" };
        let summary = format!("{} line{} would change\n", changed, plural);
        if use_color {
            output.push_str(&summary.yellow().to_string());
        } else {
            output.push_str(&summary);
        }
        output
    }
}
