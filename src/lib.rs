//! Statistical equivalence validation for paired buffer-protocol
//! measurements.
//!
//! Potency assays run under two buffer preparations, ZMB (the reference)
//! and INF3 (the candidate), produce paired measurements per batch and
//! replicate. This crate decides whether the protocols are statistically
//! equivalent: a Student-t confidence interval on the geometric mean ratio
//! checked against the 80%..125% acceptance band, plus agreement statistics
//! (Lin's concordance, Pearson correlation, a least-squares fit, and
//! percentage Bland-Altman limits).
//!
//! The pipeline is plain and sequential: extract records from a table,
//! match pairs, run the two analyzers, assemble a report.
//!
//! ```
//! use pufferval::{analyze, AnalysisConfig, SelectionMode, Table};
//!
//! let csv = "\
//! Probe,Charge,Pufferansatz,Gehalt (U/ml),Bemerkung
//! Gardasil 9,B1,ZMB,100.0,
//! Gardasil 9,B1,INF3,98.0,
//! Gardasil 9,B2,ZMB,110.0,
//! Gardasil 9,B2,INF3,112.0,
//! ";
//! let table = Table::from_csv_str(csv, ',')?;
//! let report = analyze(&table, SelectionMode::Batches, &AnalysisConfig::default())?;
//! assert_eq!(report.n_pairs, 2);
//! # Ok::<(), pufferval::AnalysisError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod pairing;
pub mod pipeline;
pub mod report;
pub mod table;
pub mod text_output;

pub use config::{AnalysisConfig, SchemaConfig};
pub use error::{AnalysisError, Result};
pub use extract::{BufferMethod, MeasurementRecord, SelectionMode};
pub use pairing::MatchedPair;
pub use pipeline::analyze;
pub use report::Report;
pub use table::Table;
