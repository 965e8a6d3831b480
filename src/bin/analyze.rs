//! Endpoint coverage analyzer.
//!
//! Runs the collection at `<ROOT>/collection.json`, scans `<ROOT>` for
//! annotated handlers, and prints which declared endpoints the run covered.
//!
//! ```bash
//! analyze .
//! analyze . --skip-run --report newman-report.json --format json
//! ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use employee_service::coverage::{
    self, ExistingReport, NewmanRunner, ReportProducer, render_json, render_table,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "analyze")]
#[command(about = "Compare declared HTTP handlers against a collection run report")]
struct Cli {
    /// Root directory to scan; must contain collection.json unless --skip-run is set
    root: PathBuf,

    /// Collection runner executable
    #[arg(long, env = "COVERAGE_RUNNER", default_value = "newman")]
    runner: String,

    /// Where the run report is written (or read from with --skip-run)
    #[arg(long, env = "COVERAGE_REPORT", default_value = "newman-report.json")]
    report: PathBuf,

    /// Kill the runner if it takes longer than this
    #[arg(
        long,
        env = "COVERAGE_TIMEOUT_SECS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Use an existing report instead of invoking the runner
    #[arg(long)]
    skip_run: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn run(cli: &Cli) -> Result<()> {
    let producer: Box<dyn ReportProducer> = if cli.skip_run {
        Box::new(ExistingReport::new(&cli.report))
    } else {
        Box::new(NewmanRunner::for_root(
            &cli.runner,
            &cli.root,
            &cli.report,
            Duration::from_secs(cli.timeout_secs),
        ))
    };

    let endpoints = coverage::run_analysis(&cli.root, producer.as_ref())?;

    match cli.format {
        OutputFormat::Table => print!("{}", render_table(&endpoints)),
        OutputFormat::Json => println!("{}", render_json(&endpoints)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
