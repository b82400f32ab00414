//! Report assembly.
//!
//! The assembler arranges values the earlier stages already computed; it
//! does no arithmetic of its own. Everything a renderer needs is here: the
//! scalar results, the matched pairs, the per-pair chart series, and the
//! indifference band for the percentage-difference plot.

use serde::Serialize;

use crate::analysis::agreement::{DIFFERENCE_BAND_LOWER_PCT, DIFFERENCE_BAND_UPPER_PCT};
use crate::analysis::equivalence::{EQUIVALENCE_LOWER, EQUIVALENCE_UPPER};
use crate::analysis::{AgreementOutcome, AgreementResult, EquivalenceResult};
use crate::extract::SelectionMode;
use crate::pairing::MatchedPair;

/// Acceptance band for the ratio interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioBand {
    pub lower: f64,
    pub upper: f64,
}

/// Indifference band on the percentage-difference chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceBand {
    pub lower_pct: f64,
    pub upper_pct: f64,
}

/// Per-pair series, index-aligned with [`Report::pairs`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Percentage difference of each pair, INF3 as reference.
    pub diff_pct: Vec<f64>,
    /// Least-squares prediction of INF3 at each pair's ZMB value.
    pub fitted_inf3: Vec<f64>,
}

/// Complete analysis report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub mode: SelectionMode,
    /// Confidence level of the ratio interval.
    pub confidence: f64,
    pub n_zmb_records: usize,
    pub n_inf3_records: usize,
    pub n_pairs: usize,
    pub equivalence: EquivalenceResult,
    pub agreement: AgreementResult,
    pub pairs: Vec<MatchedPair>,
    pub series: ChartSeries,
    pub ratio_band: RatioBand,
    pub difference_band: DifferenceBand,
    /// Set when batches and positive controls are mixed; their potencies
    /// differ by orders of magnitude, so value axes should go logarithmic.
    pub log_scale_hint: bool,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds the report from the pipeline's intermediate products.
pub fn assemble(
    mode: SelectionMode,
    confidence: f64,
    n_zmb_records: usize,
    n_inf3_records: usize,
    pairs: Vec<MatchedPair>,
    equivalence: EquivalenceResult,
    agreement: AgreementOutcome,
) -> Report {
    Report {
        mode,
        confidence,
        n_zmb_records,
        n_inf3_records,
        n_pairs: pairs.len(),
        equivalence,
        agreement: agreement.result,
        pairs,
        series: ChartSeries {
            diff_pct: agreement.diff_pct,
            fitted_inf3: agreement.fitted_inf3,
        },
        ratio_band: RatioBand {
            lower: EQUIVALENCE_LOWER,
            upper: EQUIVALENCE_UPPER,
        },
        difference_band: DifferenceBand {
            lower_pct: DIFFERENCE_BAND_LOWER_PCT,
            upper_pct: DIFFERENCE_BAND_UPPER_PCT,
        },
        log_scale_hint: mode == SelectionMode::Both,
    }
}
