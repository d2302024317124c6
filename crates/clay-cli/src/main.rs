//! clay: rewrites clay styled-component declarations across a project.

mod cli;
mod config;
mod error;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::Result;
use output::Formatter;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = orchestrator::run(&args)?;

    let formatter = Formatter::new(args.output);
    println!("{}", formatter.format(&outcome.reports, &outcome.summary));

    if outcome.summary.failure_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}
