//! Command line interface for gamebundle.
//!
//! Parses arguments into immutable settings, runs the bundler and maps the
//! outcome to a process exit code.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{Bundler, plan};
use crate::error::{CliError, Result};
use anyhow::Context as _;

/// Main CLI entry point. Returns the process exit code.
pub async fn run(args: Args) -> i32 {
    let output = OutputManager::new(args.verbose, false);

    match execute(&args, output).await {
        Ok(()) => 0,
        Err(e) => {
            output.error(&format!("Error: {e}"));
            e.exit_code()
        }
    }
}

async fn execute(args: &Args, output: OutputManager) -> Result<()> {
    let settings = args.to_settings().map_err(|e| CliError::InvalidArguments {
        reason: e.to_string(),
    })?;

    if args.dry_run {
        let json = serde_json::to_string_pretty(&plan(&settings))
            .context("rendering build plan as JSON")?;
        println!("{json}");
        return Ok(());
    }

    let report = Bundler::new(settings, output).bundle().await?;
    log::debug!(
        "Built {} target(s) from {}",
        report.built.len(),
        report.project.display()
    );
    Ok(())
}
