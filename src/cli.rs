//! Command-line arguments and how they override the config file

use crate::config::Settings;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser, Debug)]
#[command(name = "retab")]
#[command(about = "Convert leading indentation between tabs and spaces")]
#[command(long_about = "retab rewrites the leading indentation of text files.

Indentation is measured in columns (a tab advances to the next tab stop) and
then rebuilt from scratch as tabs or spaces, so running retab twice with the
same options never changes a file the second time. Files that would not change
are left untouched.

Each file is rewritten into a scratch file next to it and then renamed over the
original. Files are processed in order; the first failure stops the run.

CONFIGURATION:
  Defaults can be set in ~/.retab/config.toml:

  [indent]
    use_tabs = false
    tab_width = 2
    trim_trailing = false
  [backup]
    keep_backup = false
  [logging]
    log_file = \"/path/to/retab.log\"

EXAMPLES:
  retab -n 4 'src/**/*.c'              Tabs to 4-column spaces
  retab -t -n 4 'src/**/*.c'           Spaces to tabs at width 4
  retab -r -b '*.py'                   Also trim trailing whitespace, keep file~
  retab -d -t '*.go'                   Preview changes as a diff
  retab '**/*.js' '!vendor/**'         Everything except vendor/

Wildcards never match names starting with '.'.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
pub struct Cli {
    /// Glob patterns of files to process; a leading `!` excludes matches
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Indent with tabs (remainder columns become spaces)
    #[arg(short = 't', long, conflicts_with = "spaces")]
    pub tabs: bool,

    /// Indent with spaces, even if the config file says tabs
    #[arg(short = 's', long)]
    pub spaces: bool,

    /// Tab width in columns (default: 2)
    #[arg(short = 'n', long = "num", value_name = "N")]
    pub num: Option<NonZeroUsize>,

    /// Trim trailing spaces and tabs
    #[arg(short = 'r', long)]
    pub trim: bool,

    /// Keep the original of every changed file as <file>~
    #[arg(short = 'b', long)]
    pub backup: bool,

    /// Show what would change without modifying any file
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report warnings and errors
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Config file to use instead of ~/.retab/config.toml
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long = "no-config")]
    pub no_config: bool,

    /// Also write a debug log to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags override whatever the config file provided
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if self.tabs {
            settings.use_tabs = true;
        }
        if self.spaces {
            settings.use_tabs = false;
        }
        if let Some(n) = self.num {
            settings.tab_width = n;
        }
        if self.trim {
            settings.trim_trailing = true;
        }
        if self.backup {
            settings.keep_backup = true;
        }
        settings
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
