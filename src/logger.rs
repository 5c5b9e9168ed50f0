//! Logging setup for retab
//!
//! Progress messages go to stderr through `tracing`. A debug log file can be
//! added with `--log-file` or `[logging] log_file` in the config.

use anyhow::Result;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Environment variable that overrides the console filter
pub const LOG_ENV: &str = "RETAB_LOG";

/// Default console directive for the given verbosity
///
/// `quiet` wins over any number of `-v`.
pub fn console_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "retab=warn";
    }
    match verbose {
        0 => "retab=info",
        1 => "retab=debug",
        _ => "retab=trace",
    }
}

/// Initialize console logging, plus the debug log file if one is given
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let console_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(console_directive(verbose, quiet)));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .with_filter(console_filter);

    let file_layer = log_file.and_then(log_file_writer).map(|appender| {
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_thread_ids(false)
            .with_filter(EnvFilter::new("retab=debug"))
    });

    registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}

/// Open the debug log file for appending, creating its directory
///
/// Returns `None` with a warning on stderr if the file cannot be opened;
/// logging must never stop the files from being processed.
fn log_file_writer(path: &Path) -> Option<RollingFileAppender> {
    let Some(file_name) = path.file_name() else {
        eprintln!("Warning: Log file path has no file name: {}", path.display());
        return None;
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!("Warning: Could not open log file {}: {}", path.display(), e);
            None
        }
    }
}
