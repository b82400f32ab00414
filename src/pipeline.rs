//! End-to-end pipeline: table in, report out.
//!
//! Stages run strictly in order, each consuming the previous one's output:
//! extract, match, analyze (both analyzers over the same pairs), assemble.
//! Any stage error aborts the run; there is nothing worth salvaging from a
//! partial analysis.

use tracing::debug;

use crate::analysis::{analyze_agreement, analyze_equivalence};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::extract::{extract_records, SelectionMode};
use crate::pairing::match_pairs;
use crate::report::{assemble, Report};
use crate::table::Table;

/// Runs the full analysis over an in-memory table.
///
/// # Arguments
///
/// * `table` - Parsed tabular input with a header row
/// * `mode` - Which sample groups to analyze
/// * `config` - Confidence level and column schema
///
/// # Returns
///
/// A [`Report`] carrying both analyzer results, the matched pairs, and the
/// chart series, or the first stage error. See the crate-level example.
pub fn analyze(table: &Table, mode: SelectionMode, config: &AnalysisConfig) -> Result<Report> {
    config.validate()?;
    debug!(rows = table.n_rows(), %mode, "starting analysis");

    let extraction = extract_records(table, mode, &config.schema)?;
    debug!(
        zmb = extraction.zmb.len(),
        inf3 = extraction.inf3.len(),
        "records extracted"
    );

    let pairs = match_pairs(&extraction)?;
    debug!(pairs = pairs.len(), "pairs matched");

    let equivalence = analyze_equivalence(&pairs, config.confidence)?;
    let agreement = analyze_agreement(&pairs)?;
    debug!(
        ratio = equivalence.ratio,
        ccc = agreement.result.ccc,
        equivalent = equivalence.is_equivalent,
        "analysis complete"
    );

    Ok(assemble(
        mode,
        config.confidence,
        extraction.zmb.len(),
        extraction.inf3.len(),
        pairs,
        equivalence,
        agreement,
    ))
}
