//! vuecast: convert Vue template syntax in Astro components.

mod cli;
mod config;
mod logger;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    let summary = orchestrator::run(args).into_diagnostic()?;
    if summary.failed() {
        std::process::exit(1);
    }
    Ok(())
}
