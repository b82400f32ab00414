//! Error taxonomy for the validation pipeline.
//!
//! Every variant names the stage that failed and carries enough context for
//! a user-facing message. None of these are retriable: the computation is
//! deterministic, so a retry would reproduce the same error.

use thiserror::Error;

/// Errors produced by the analysis pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Required columns are missing from the input table. Raised by the
    /// record extractor before any numeric work.
    #[error("schema validation failed: missing required column(s): {}", .columns.join(", "))]
    Schema { columns: Vec<String> },

    /// Filtering left zero rows for one of the two methods. Warning class:
    /// the run halts, but the caller may treat it as "nothing to analyze"
    /// rather than a crash.
    #[error("record extraction produced no {method} rows for mode '{mode}'; check the selection and the remark column")]
    EmptyResult { method: String, mode: String },

    /// The inner join produced zero matched pairs.
    #[error("pair matching produced no pairs: {zmb_records} ZMB and {inf3_records} INF3 records share no (batch, group, replicate) key")]
    NoData {
        zmb_records: usize,
        inf3_records: usize,
    },

    /// Too few matched pairs for a variance estimate.
    #[error("analysis needs at least {required} matched pairs, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A value the statistics cannot accept: a non-positive input to a
    /// logarithm, or a zero denominator. Raised deliberately instead of
    /// letting NaN flow into the result. `batch_id` is set when a single
    /// row is to blame, `None` for whole-series degeneracies.
    #[error("invalid value in {context}: {value}{}", batch_suffix(.batch_id))]
    InvalidValue {
        context: String,
        value: f64,
        batch_id: Option<String>,
    },

    /// Configuration rejected by [`AnalysisConfig::validate`](crate::config::AnalysisConfig::validate).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed CSV input (host-side table loading only).
    #[error("CSV parse error at line {line}: {message}")]
    CsvParse { line: usize, message: String },

    /// I/O failure while reading the input file (host-side only).
    #[error("failed to read input: {0}")]
    Io(String),
}

impl From<std::io::Error> for AnalysisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

fn batch_suffix(batch_id: &Option<String>) -> String {
    match batch_id {
        Some(b) => format!(" (batch '{b}')"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = AnalysisError::Schema {
            columns: vec!["Gehalt (U/ml)".to_string(), "Pufferansatz".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Gehalt (U/ml)"));
        assert!(msg.contains("Pufferansatz"));
    }

    #[test]
    fn test_empty_result_names_method_and_mode() {
        let err = AnalysisError::EmptyResult {
            method: "INF3".to_string(),
            mode: "positive-control".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("INF3"));
        assert!(msg.contains("positive-control"));
    }

    #[test]
    fn test_invalid_value_names_batch_when_known() {
        let err = AnalysisError::InvalidValue {
            context: "log-ratio input (ZMB)".to_string(),
            value: -3.5,
            batch_id: Some("B7".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("log-ratio"));
        assert!(msg.contains("-3.5"));
        assert!(msg.contains("B7"));
    }

    #[test]
    fn test_invalid_value_without_batch_omits_suffix() {
        let err = AnalysisError::InvalidValue {
            context: "regression denominator".to_string(),
            value: 0.0,
            batch_id: None,
        };
        assert!(!err.to_string().contains("batch"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: AnalysisError = io.into();
        assert!(matches!(err, AnalysisError::Io(_)));
    }
}
