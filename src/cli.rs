//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::extract::SelectionMode;

/// Statistical comparison of ZMB and INF3 buffer protocol measurements.
#[derive(Parser, Debug)]
#[command(name = "pufferval", version, about, long_about = None)]
pub struct Cli {
    /// CSV export of the measurement table
    pub file: PathBuf,

    /// Which sample groups to analyze
    #[arg(short, long, value_enum, default_value_t = ModeArg::Batches)]
    pub mode: ModeArg,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// CSV field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Two-sided confidence level for the ratio interval
    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,

    /// Verbose pipeline diagnostics on stderr
    #[arg(long)]
    pub debug: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Vaccine batches only
    Batches,
    /// Positive-control samples only
    PositiveControl,
    /// The whole table, every sample group
    Both,
}

impl From<ModeArg> for SelectionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Batches => Self::Batches,
            ModeArg::PositiveControl => Self::PositiveControl,
            ModeArg::Both => Self::Both,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable summary
    Text,
    /// Machine-readable report
    Json,
}
