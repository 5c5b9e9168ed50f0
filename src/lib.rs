//! retab: convert leading indentation between tabs and spaces
//!
//! The library holds the whole pipeline; the binary at src/main.rs only
//! wires command-line parsing, config and logging around [`BatchRunner`].

pub mod batch;
pub mod cli;
pub mod commit;
pub mod config;
pub mod diff_formatter;
pub mod error;
pub mod error_helpers;
pub mod file_processor;
pub mod logger;
pub mod patterns;
pub mod transform;
pub mod whitespace;

// Re-export commonly used types for convenience
pub use batch::{BatchError, BatchReport, BatchRunner, FileState, FileTask};
pub use commit::{backup_path, CommitOutcome, ReplacementCommitter};
pub use config::Settings;
pub use error::RetabError;
pub use file_processor::{FileRewriter, RewriteResult, UniversalLines};
pub use transform::{transform_line, LineOutcome};
pub use whitespace::{leading_whitespace, whitespace_width};
