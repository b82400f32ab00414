//! Pair matching: aligning the two method streams into measurement pairs.
//!
//! A ZMB record and an INF3 record form a pair when they agree on
//! (batch, group, replicate). This is an inner join: records without a
//! partner on the other side are silently dropped. Output order is the ZMB
//! stream's encounter order, so downstream series line up with the table.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::extract::Extraction;

/// One aligned measurement pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub sample_group: String,
    pub batch_id: String,
    pub replicate: usize,
    pub zmb_value: f64,
    pub inf3_value: f64,
}

/// Joins the two streams on (batch, group, replicate).
///
/// Keys are unique per method by construction of the replicate index; a
/// hand-built extraction with duplicate keys keeps the last occurrence.
/// Pairs where either value is non-finite are discarded.
pub fn match_pairs(extraction: &Extraction) -> Result<Vec<MatchedPair>> {
    let mut inf3_by_key: HashMap<(&str, &str, usize), f64> =
        HashMap::with_capacity(extraction.inf3.len());
    for rec in &extraction.inf3 {
        inf3_by_key.insert(
            (rec.batch_id.as_str(), rec.sample_group.as_str(), rec.replicate),
            rec.value,
        );
    }

    let mut pairs = Vec::new();
    for rec in &extraction.zmb {
        let key = (rec.batch_id.as_str(), rec.sample_group.as_str(), rec.replicate);
        let Some(&inf3_value) = inf3_by_key.get(&key) else {
            continue;
        };
        if !rec.value.is_finite() || !inf3_value.is_finite() {
            continue;
        }
        pairs.push(MatchedPair {
            sample_group: rec.sample_group.clone(),
            batch_id: rec.batch_id.clone(),
            replicate: rec.replicate,
            zmb_value: rec.value,
            inf3_value,
        });
    }

    if pairs.is_empty() {
        return Err(AnalysisError::NoData {
            zmb_records: extraction.zmb.len(),
            inf3_records: extraction.inf3.len(),
        });
    }
    Ok(pairs)
}
