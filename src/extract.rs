//! Record extraction: from a raw [`Table`] to clean per-method measurement
//! records.
//!
//! Filtering is row-local. A row survives when its group label matches the
//! selection mode, its remark cell is empty, its method tag is one of the
//! two configured protocols, and its value parses as a finite float. The
//! replicate index is assigned after filtering: a zero-based running count
//! per (batch, group), kept separately for each method, in encounter order.
//! Nothing is ever sorted; downstream order is the table's order.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::config::SchemaConfig;
use crate::error::{AnalysisError, Result};
use crate::table::Table;

/// Which buffer protocol produced a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferMethod {
    Zmb,
    Inf3,
}

impl BufferMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zmb => "ZMB",
            Self::Inf3 => "INF3",
        }
    }
}

impl fmt::Display for BufferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sample groups take part in the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// Vaccine batches only.
    Batches,
    /// Positive-control samples only.
    PositiveControl,
    /// The whole table, any group label. Unrecognized labels survive here
    /// and pair up only if both methods measured them.
    Both,
}

impl SelectionMode {
    /// Whether rows with this group label take part.
    pub fn admits(self, group: &str, schema: &SchemaConfig) -> bool {
        match self {
            Self::Batches => schema.vaccine_groups.iter().any(|g| g == group),
            Self::PositiveControl => schema.control_groups.iter().any(|g| g == group),
            Self::Both => true,
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Batches => "batches",
            Self::PositiveControl => "positive-control",
            Self::Both => "both",
        };
        f.write_str(s)
    }
}

/// One clean measurement, ready for pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub sample_group: String,
    pub batch_id: String,
    pub method: BufferMethod,
    pub value: f64,
    /// Zero-based repeat index within (batch, group), per method.
    pub replicate: usize,
}

/// Extraction output: the two method streams, each in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub zmb: Vec<MeasurementRecord>,
    pub inf3: Vec<MeasurementRecord>,
}

/// Validates the schema, filters rows, and assigns replicate indices.
///
/// Values are kept as parsed, including zero and negative readings; whether
/// such a value is acceptable is the analyzers' call, not the extractor's.
pub fn extract_records(
    table: &Table,
    mode: SelectionMode,
    schema: &SchemaConfig,
) -> Result<Extraction> {
    let found = [
        table.column_index(&schema.group_column),
        table.column_index(&schema.batch_column),
        table.column_index(&schema.method_column),
        table.column_index(&schema.value_column),
    ];
    let (group_col, batch_col, method_col, value_col) = match found {
        [Some(g), Some(b), Some(m), Some(v)] => (g, b, m, v),
        _ => {
            let columns = schema
                .required_columns()
                .into_iter()
                .zip(found)
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(AnalysisError::Schema { columns });
        }
    };
    let remark_col = table.column_index(&schema.remark_column);

    let mut zmb = Vec::new();
    let mut inf3 = Vec::new();
    // Replicate counters, independent per method.
    let mut zmb_reps: HashMap<(String, String), usize> = HashMap::new();
    let mut inf3_reps: HashMap<(String, String), usize> = HashMap::new();

    for row in 0..table.n_rows() {
        let group = match table.cell(row, group_col).map(str::trim) {
            Some(g) if mode.admits(g, schema) => g,
            _ => continue,
        };
        if let Some(col) = remark_col {
            if table.cell(row, col).is_some_and(|r| !r.trim().is_empty()) {
                continue;
            }
        }
        let method = match table.cell(row, method_col).map(str::trim) {
            Some(tag) if tag == schema.zmb_tag => BufferMethod::Zmb,
            Some(tag) if tag == schema.inf3_tag => BufferMethod::Inf3,
            _ => continue,
        };
        let value = match table
            .cell(row, value_col)
            .and_then(|v| v.trim().parse::<f64>().ok())
        {
            Some(v) if v.is_finite() => v,
            _ => continue,
        };
        let batch_id = table.cell(row, batch_col).unwrap_or("").trim().to_string();

        let key = (batch_id.clone(), group.to_string());
        let (records, reps) = match method {
            BufferMethod::Zmb => (&mut zmb, &mut zmb_reps),
            BufferMethod::Inf3 => (&mut inf3, &mut inf3_reps),
        };
        let counter = reps.entry(key).or_insert(0);
        let replicate = *counter;
        *counter += 1;

        records.push(MeasurementRecord {
            sample_group: group.to_string(),
            batch_id,
            method,
            value,
            replicate,
        });
    }

    if zmb.is_empty() || inf3.is_empty() {
        let method = match (zmb.is_empty(), inf3.is_empty()) {
            (true, true) => "ZMB or INF3",
            (true, false) => "ZMB",
            _ => "INF3",
        };
        return Err(AnalysisError::EmptyResult {
            method: method.to_string(),
            mode: mode.to_string(),
        });
    }

    Ok(Extraction { zmb, inf3 })
}
