//! Ratio equivalence test on the log scale.
//!
//! For each pair the log ratio `ln(zmb / inf3)` is taken; the mean log ratio
//! gets a two-sided Student-t interval (`t` at n-1 degrees of freedom,
//! standard error `s / sqrt(n)`), and everything is exponentiated back. The
//! point estimate is therefore the geometric mean ratio. Equivalence holds
//! when the whole interval sits inside the 80%..125% acceptance band, both
//! boundaries inclusive.

use serde::Serialize;

use crate::analysis::{stats, MIN_PAIRS};
use crate::error::{AnalysisError, Result};
use crate::pairing::MatchedPair;

/// Acceptance band for the ratio interval.
pub const EQUIVALENCE_LOWER: f64 = 0.80;
pub const EQUIVALENCE_UPPER: f64 = 1.25;

/// Outcome of the ratio test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquivalenceResult {
    pub n_pairs: usize,
    /// Geometric mean of the per-pair ZMB/INF3 ratios.
    pub ratio: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub is_equivalent: bool,
}

/// True when the interval lies inside the acceptance band. Boundaries are
/// inclusive: an interval touching 0.80 or 1.25 still passes.
pub fn within_equivalence_band(ci_lower: f64, ci_upper: f64) -> bool {
    ci_lower >= EQUIVALENCE_LOWER && ci_upper <= EQUIVALENCE_UPPER
}

/// Runs the ratio test at the given two-sided confidence level.
///
/// Every measurement must be strictly positive; the log transform has no
/// answer for anything else, and the offending batch is named in the error.
pub fn analyze_equivalence(
    pairs: &[MatchedPair],
    confidence: f64,
) -> Result<EquivalenceResult> {
    let n = pairs.len();
    if n < MIN_PAIRS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_PAIRS,
            actual: n,
        });
    }

    let mut log_ratios = Vec::with_capacity(n);
    for pair in pairs {
        if pair.zmb_value <= 0.0 {
            return Err(non_positive("ZMB", pair.zmb_value, &pair.batch_id));
        }
        if pair.inf3_value <= 0.0 {
            return Err(non_positive("INF3", pair.inf3_value, &pair.batch_id));
        }
        log_ratios.push((pair.zmb_value / pair.inf3_value).ln());
    }

    let mean_log = stats::mean(&log_ratios);
    let std_err = stats::sample_std(&log_ratios) / (n as f64).sqrt();
    let t = stats::t_critical(confidence, (n - 1) as f64)?;

    let ci_lower = (mean_log - t * std_err).exp();
    let ci_upper = (mean_log + t * std_err).exp();

    Ok(EquivalenceResult {
        n_pairs: n,
        ratio: mean_log.exp(),
        ci_lower,
        ci_upper,
        is_equivalent: within_equivalence_band(ci_lower, ci_upper),
    })
}

fn non_positive(side: &str, value: f64, batch_id: &str) -> AnalysisError {
    AnalysisError::InvalidValue {
        context: format!("log-ratio input ({side})"),
        value,
        batch_id: Some(batch_id.to_string()),
    }
}
