//! Shared statistical primitives.
//!
//! Thin, named wrappers over `statrs` so the analyzers read like the
//! formulas they implement. All second moments use the sample (n-1)
//! convention; callers guarantee at least two observations.

use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

use crate::error::{AnalysisError, Result};

pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Sample variance, n-1 denominator.
pub fn sample_variance(values: &[f64]) -> f64 {
    values.iter().variance()
}

/// Sample standard deviation, n-1 denominator.
pub fn sample_std(values: &[f64]) -> f64 {
    values.iter().std_dev()
}

/// Sample covariance, n-1 denominator. Both slices must have equal length.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> f64 {
    x.iter().covariance(y.iter())
}

/// Two-sided Student-t critical value: the quantile at
/// `0.5 + confidence / 2` with `df` degrees of freedom.
pub fn t_critical(confidence: f64, df: f64) -> Result<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AnalysisError::Config(format!(
            "confidence must be in (0, 1), got {confidence}"
        )));
    }
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        AnalysisError::Config(format!(
            "Student-t with {df} degrees of freedom: {e}"
        ))
    })?;
    Ok(dist.inverse_cdf(0.5 + confidence / 2.0))
}
