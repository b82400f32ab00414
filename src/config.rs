//! Pipeline configuration.
//!
//! Defaults match the validation exports this tool was written for (German
//! column headers, `ZMB`/`INF3` method tags). Everything is overridable so
//! the engine stays usable when a lab renames a column.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Column names and label vocabulary of the input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Sample-group column, e.g. `Probe`.
    pub group_column: String,
    /// Batch identifier column, e.g. `Charge`.
    pub batch_column: String,
    /// Buffer-method column, e.g. `Pufferansatz`.
    pub method_column: String,
    /// Measured potency column, e.g. `Gehalt (U/ml)`.
    pub value_column: String,
    /// Free-text remark column, e.g. `Bemerkung`. The column itself is
    /// optional in the table; rows with a non-empty remark are excluded.
    pub remark_column: String,
    /// Method tag selecting the reference protocol rows.
    pub zmb_tag: String,
    /// Method tag selecting the test protocol rows.
    pub inf3_tag: String,
    /// Group labels that count as vaccine batches.
    pub vaccine_groups: Vec<String>,
    /// Group labels that count as positive controls.
    pub control_groups: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            group_column: "Probe".to_string(),
            batch_column: "Charge".to_string(),
            method_column: "Pufferansatz".to_string(),
            value_column: "Gehalt (U/ml)".to_string(),
            remark_column: "Bemerkung".to_string(),
            zmb_tag: "ZMB".to_string(),
            inf3_tag: "INF3".to_string(),
            vaccine_groups: vec!["Gardasil 9".to_string(), "Gardasil".to_string()],
            control_groups: vec!["Positivkontrolle".to_string()],
        }
    }
}

impl SchemaConfig {
    /// Columns that must exist in the table. The remark column is not among
    /// them: a table without remarks is simply a table where nothing is
    /// flagged.
    pub fn required_columns(&self) -> Vec<&str> {
        vec![
            self.group_column.as_str(),
            self.batch_column.as_str(),
            self.method_column.as_str(),
            self.value_column.as_str(),
        ]
    }
}

/// Knobs of the statistical analysis itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Two-sided confidence level for the ratio interval, in (0, 1).
    pub confidence: f64,
    /// Input-table vocabulary.
    pub schema: SchemaConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            schema: SchemaConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(AnalysisError::Config(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }
        if self.schema.zmb_tag == self.schema.inf3_tag {
            return Err(AnalysisError::Config(format!(
                "method tags must differ, both are '{}'",
                self.schema.zmb_tag
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_schema_matches_export_vocabulary() {
        let s = SchemaConfig::default();
        assert_eq!(s.value_column, "Gehalt (U/ml)");
        assert_eq!(
            s.required_columns(),
            vec!["Probe", "Charge", "Pufferansatz", "Gehalt (U/ml)"]
        );
        assert!(!s.required_columns().contains(&"Bemerkung"));
    }

    #[test]
    fn test_rejects_confidence_outside_unit_interval() {
        for c in [0.0, 1.0, -0.5, 1.7, f64::NAN] {
            let cfg = AnalysisConfig {
                confidence: c,
                ..Default::default()
            };
            assert!(matches!(cfg.validate(), Err(AnalysisError::Config(_))));
        }
    }

    #[test]
    fn test_rejects_identical_method_tags() {
        let mut cfg = AnalysisConfig::default();
        cfg.schema.inf3_tag = cfg.schema.zmb_tag.clone();
        assert!(matches!(cfg.validate(), Err(AnalysisError::Config(_))));
    }

    #[test]
    fn test_partial_json_config_fills_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str(r#"{"confidence": 0.9}"#).unwrap();
        assert_eq!(cfg.confidence, 0.9);
        assert_eq!(cfg.schema.zmb_tag, "ZMB");
    }
}
