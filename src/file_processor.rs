//! Streaming rewrite of one file into a scratch file next to it

use crate::config::Settings;
use crate::error::{Result, RetabError};
use crate::transform::transform_line;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Line terminator written to every output line
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Streams lines split on `\n`, `\r\n` or a lone `\r`, without terminators
///
/// Input must be UTF-8; anything else is reported as `InvalidData`. Only one
/// line is held in memory at a time, whichever terminator the file uses.
pub struct UniversalLines<R> {
    reader: R,
    // Previous line ended in '\r'; a '\n' right after it belongs to that terminator
    skip_lf: bool,
}

impl<R: BufRead> UniversalLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            skip_lf: false,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        loop {
            let (consumed, terminated) = {
                let available = self.reader.fill_buf()?;
                if available.is_empty() {
                    break;
                }

                let mut start = 0;
                if self.skip_lf {
                    self.skip_lf = false;
                    if available[0] == b'\n' {
                        start = 1;
                    }
                }

                let rest = &available[start..];
                match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
                    Some(i) => {
                        line.extend_from_slice(&rest[..i]);
                        self.skip_lf = rest[i] == b'\r';
                        (start + i + 1, true)
                    }
                    None => {
                        line.extend_from_slice(rest);
                        (available.len(), false)
                    }
                }
            };
            self.reader.consume(consumed);
            if terminated {
                return Self::decode(line).map(Some);
            }
        }

        // End of input: an unterminated tail is the last line
        if line.is_empty() {
            Ok(None)
        } else {
            Self::decode(line).map(Some)
        }
    }

    fn decode(bytes: Vec<u8>) -> io::Result<String> {
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl<R: BufRead> Iterator for UniversalLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

/// Outcome of rewriting one file into its scratch file
///
/// Dropping it without committing deletes the scratch file.
#[derive(Debug)]
pub struct RewriteResult {
    pub(crate) scratch: NamedTempFile,
    pub changed: bool,
    pub lines: usize,
    pub changed_lines: usize,
}

impl RewriteResult {
    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }
}

/// Streams a file through the line transform into a scratch file
pub struct FileRewriter<'a> {
    settings: &'a Settings,
}

impl<'a> FileRewriter<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Directory for the scratch file: next to the target, so the final
    /// rename stays on one filesystem
    fn scratch_dir(file_path: &Path) -> PathBuf {
        match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn rewrite(&self, file_path: &Path) -> Result<RewriteResult> {
        let input_file = File::open(file_path)
            .map_err(|e| RetabError::io("open", file_path, e))?;
        let permissions = input_file
            .metadata()
            .map_err(|e| RetabError::io("read metadata of", file_path, e))?
            .permissions();

        let parent_dir = Self::scratch_dir(file_path);
        let scratch = tempfile::Builder::new()
            .prefix(".retab-")
            .suffix(".tmp")
            .tempfile_in(&parent_dir)
            .map_err(|e| RetabError::io("create scratch file in", &parent_dir, e))?;
        debug!("Scratch file for {}: {}", file_path.display(), scratch.path().display());

        let mut lines = 0usize;
        let mut changed_lines = 0usize;

        // Writer must be dropped before the scratch file is handed back
        {
            let mut writer = BufWriter::new(scratch.as_file());

            for line_result in UniversalLines::new(BufReader::new(input_file)) {
                let line = line_result.map_err(|e| RetabError::io("read", file_path, e))?;
                lines += 1;

                let outcome = transform_line(&line, self.settings).map_err(|e| {
                    RetabError::InvalidLine {
                        path: file_path.to_path_buf(),
                        line: lines,
                        source: Box::new(e),
                    }
                })?;
                if outcome.changed {
                    changed_lines += 1;
                }

                write!(writer, "{}{}", outcome.line, LINE_SEPARATOR)
                    .map_err(|e| RetabError::io("write", scratch.path(), e))?;
            }

            writer
                .flush()
                .map_err(|e| RetabError::io("flush", scratch.path(), e))?;
        }

        // Replacing the file must not change its mode
        fs::set_permissions(scratch.path(), permissions)
            .map_err(|e| RetabError::io("set permissions on", scratch.path(), e))?;

        debug!(
            "Rewrote {}: {} line(s), {} changed",
            file_path.display(),
            lines,
            changed_lines
        );

        Ok(RewriteResult {
            scratch,
            changed: changed_lines > 0,
            lines,
            changed_lines,
        })
    }
}
