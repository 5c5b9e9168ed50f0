use anyhow::{Context, Result};
use colored::*;
use retab::batch::BatchRunner;
use retab::cli::{parse_args, Cli};
use retab::config::{self, Settings};
use retab::{error_helpers, logger, patterns};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            if let Some(hint) = err
                .downcast_ref::<retab::BatchError>()
                .and_then(error_helpers::hint_for)
            {
                eprintln!("\n{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let file_config = if cli.no_config {
        config::Config::default()
    } else {
        config::load_config(cli.config.as_deref())?
    };

    let log_file = cli.log_file.as_deref().or(file_config.logging.log_file.as_deref());
    logger::init_logging(cli.verbose, cli.quiet, log_file)?;

    let settings = cli.apply_overrides(Settings::from_config(&file_config)?);
    tracing::debug!("Settings: {:?}", settings);

    let files = patterns::expand_patterns(&cli.patterns)
        .context("Failed to expand file patterns")?;

    BatchRunner::new(&settings)
        .dry_run(cli.dry_run)
        .run(&files)?;

    Ok(())
}
