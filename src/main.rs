use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pufferval::cli::{Cli, FormatArg};
use pufferval::config::AnalysisConfig;
use pufferval::error::AnalysisError;
use pufferval::pipeline::analyze;
use pufferval::table::Table;
use pufferval::text_output;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // An empty selection is an answer, not a failure.
            if let Some(AnalysisError::EmptyResult { .. }) = err.downcast_ref::<AnalysisError>() {
                eprintln!("warning: {err:#}");
                ExitCode::SUCCESS
            } else {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let table = Table::from_csv_path(&cli.file, cli.delimiter)
        .with_context(|| format!("reading {}", cli.file.display()))?;

    let config = AnalysisConfig {
        confidence: cli.confidence,
        ..Default::default()
    };
    let report = analyze(&table, cli.mode.into(), &config)?;

    let rendered = match cli.format {
        FormatArg::Text => text_output::render(&report),
        FormatArg::Json => report.to_json().context("serializing report")?,
    };
    println!("{rendered}");
    Ok(())
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
