//! Method-agreement statistics over the matched pairs.
//!
//! Four views of the same question, "do the two protocols read alike":
//! Lin's concordance correlation coefficient, the Pearson correlation, a
//! least-squares line `inf3 = slope * zmb + intercept`, and a percentage
//! Bland-Altman analysis of `(zmb - inf3) / inf3 * 100`. The analyzer also
//! emits the per-pair series (percentage differences, fitted line values)
//! so report rendering never has to recompute anything.

use serde::Serialize;

use crate::analysis::{stats, MIN_PAIRS};
use crate::error::{AnalysisError, Result};
use crate::pairing::MatchedPair;

/// Indifference band drawn on the percentage-difference chart: the
/// 80%..125% ratio band mapped to percent deviations. On the percent scale
/// the band is asymmetric, which is deliberate.
pub const DIFFERENCE_BAND_LOWER_PCT: f64 = -20.0;
pub const DIFFERENCE_BAND_UPPER_PCT: f64 = 25.0;

/// Normal quantile for the conventional 95% limits of agreement. Fixed by
/// convention, independent of the ratio interval's confidence level.
const LOA_Z: f64 = 1.96;

/// Scalar agreement summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementResult {
    pub n_pairs: usize,
    /// Lin's concordance correlation coefficient.
    pub ccc: f64,
    pub pearson_r: f64,
    /// Least-squares slope of INF3 on ZMB.
    pub slope: f64,
    pub intercept: f64,
    /// Mean percentage difference (ZMB vs INF3, INF3 as reference).
    pub bias_pct: f64,
    pub loa_lower_pct: f64,
    pub loa_upper_pct: f64,
}

/// Agreement summary plus the per-pair series behind it, index-aligned
/// with the input pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct AgreementOutcome {
    pub result: AgreementResult,
    /// `(zmb - inf3) / inf3 * 100` per pair.
    pub diff_pct: Vec<f64>,
    /// `slope * zmb + intercept` per pair.
    pub fitted_inf3: Vec<f64>,
}

pub fn analyze_agreement(pairs: &[MatchedPair]) -> Result<AgreementOutcome> {
    let n = pairs.len();
    if n < MIN_PAIRS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_PAIRS,
            actual: n,
        });
    }
    for pair in pairs {
        if pair.inf3_value == 0.0 {
            return Err(AnalysisError::InvalidValue {
                context: "percentage-difference denominator (INF3)".to_string(),
                value: 0.0,
                batch_id: Some(pair.batch_id.clone()),
            });
        }
    }

    let zmb: Vec<f64> = pairs.iter().map(|p| p.zmb_value).collect();
    let inf3: Vec<f64> = pairs.iter().map(|p| p.inf3_value).collect();
    let diff_pct: Vec<f64> = pairs
        .iter()
        .map(|p| (p.zmb_value - p.inf3_value) / p.inf3_value * 100.0)
        .collect();

    let mean_zmb = stats::mean(&zmb);
    let mean_inf3 = stats::mean(&inf3);
    let var_zmb = stats::sample_variance(&zmb);
    let var_inf3 = stats::sample_variance(&inf3);
    let cov = stats::sample_covariance(&zmb, &inf3);

    if var_zmb == 0.0 {
        return Err(degenerate_series("regression denominator (constant ZMB series)"));
    }
    if var_inf3 == 0.0 {
        return Err(degenerate_series("correlation denominator (constant INF3 series)"));
    }

    let slope = cov / var_zmb;
    let intercept = mean_inf3 - slope * mean_zmb;
    let pearson_r = cov / (var_zmb.sqrt() * var_inf3.sqrt());
    let mean_delta = mean_zmb - mean_inf3;
    let ccc = 2.0 * cov / (var_zmb + var_inf3 + mean_delta * mean_delta);

    let bias_pct = stats::mean(&diff_pct);
    let sd_diff = stats::sample_std(&diff_pct);
    let loa_lower_pct = bias_pct - LOA_Z * sd_diff;
    let loa_upper_pct = bias_pct + LOA_Z * sd_diff;

    let fitted_inf3 = zmb.iter().map(|&x| slope * x + intercept).collect();

    Ok(AgreementOutcome {
        result: AgreementResult {
            n_pairs: n,
            ccc,
            pearson_r,
            slope,
            intercept,
            bias_pct,
            loa_lower_pct,
            loa_upper_pct,
        },
        diff_pct,
        fitted_inf3,
    })
}

fn degenerate_series(context: &str) -> AnalysisError {
    AnalysisError::InvalidValue {
        context: context.to_string(),
        value: 0.0,
        batch_id: None,
    }
}
