//! End-to-end pipeline tests over a realistic validation export.

use std::path::Path;

use pufferval::{analyze, AnalysisConfig, AnalysisError, SelectionMode, Table};

fn fixture_table() -> Table {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/validation_run.csv");
    Table::from_csv_path(&path, ',').unwrap()
}

#[test]
fn test_batches_mode_analyzes_the_four_batches() {
    let report = analyze(
        &fixture_table(),
        SelectionMode::Batches,
        &AnalysisConfig::default(),
    )
    .unwrap();

    // The export carries 8 clean measurement rows per method; the flagged
    // outlier, the unparseable reading, the odd method tag, and the
    // Blindwert row all fall away.
    assert_eq!(report.n_zmb_records, 8);
    assert_eq!(report.n_inf3_records, 8);
    assert_eq!(report.n_pairs, 8);
    assert!(report.pairs.iter().all(|p| p.sample_group == "Gardasil 9"));
    assert!(report.pairs.iter().all(|p| p.zmb_value != 4410.0));

    assert!(report.equivalence.is_equivalent);
    assert!(report.equivalence.ratio > 1.0 && report.equivalence.ratio < 1.02);
    assert!(report.equivalence.ci_lower > 0.98);
    assert!(report.equivalence.ci_upper < 1.03);

    assert!(report.agreement.ccc > 0.9);
    assert!(report.agreement.pearson_r > 0.9);
    assert!(!report.log_scale_hint);
}

#[test]
fn test_positive_control_mode_analyzes_the_control_replicates() {
    let report = analyze(
        &fixture_table(),
        SelectionMode::PositiveControl,
        &AnalysisConfig::default(),
    )
    .unwrap();
    assert_eq!(report.n_pairs, 3);
    assert!(report.pairs.iter().all(|p| p.batch_id == "PK-2204"));
    assert!(report.equivalence.is_equivalent);
    assert!(!report.log_scale_hint);
}

#[test]
fn test_both_mode_joins_batches_and_control() {
    let report = analyze(
        &fixture_table(),
        SelectionMode::Both,
        &AnalysisConfig::default(),
    )
    .unwrap();
    // The Blindwert row is admitted in this mode but has no INF3 partner,
    // so it drops out at pairing.
    assert_eq!(report.n_zmb_records, 12);
    assert_eq!(report.n_inf3_records, 11);
    assert_eq!(report.n_pairs, 11);
    assert!(report.pairs.iter().all(|p| p.sample_group != "Blindwert"));
    assert!(report.log_scale_hint);
}

#[test]
fn test_replicates_pair_in_table_order() {
    let report = analyze(
        &fixture_table(),
        SelectionMode::Batches,
        &AnalysisConfig::default(),
    )
    .unwrap();
    let first_batch: Vec<_> = report
        .pairs
        .iter()
        .filter(|p| p.batch_id == "22041801")
        .collect();
    assert_eq!(first_batch.len(), 2);
    assert_eq!(first_batch[0].replicate, 0);
    assert_eq!(first_batch[0].zmb_value, 4100.0);
    assert_eq!(first_batch[0].inf3_value, 4020.0);
    assert_eq!(first_batch[1].replicate, 1);
    assert_eq!(first_batch[1].zmb_value, 4150.0);
    assert_eq!(first_batch[1].inf3_value, 4090.0);
}

#[test]
fn test_repeated_runs_are_deterministic() {
    let table = fixture_table();
    let cfg = AnalysisConfig::default();
    let a = analyze(&table, SelectionMode::Both, &cfg).unwrap();
    let b = analyze(&table, SelectionMode::Both, &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_json_report_round_trips_through_serde() {
    let report = analyze(
        &fixture_table(),
        SelectionMode::Batches,
        &AnalysisConfig::default(),
    )
    .unwrap();
    let json = report.to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["mode"], "batches");
    assert_eq!(v["n_pairs"], 8);
    assert_eq!(v["pairs"].as_array().map(Vec::len), Some(8));
    assert_eq!(v["series"]["fitted_inf3"].as_array().map(Vec::len), Some(8));
    assert_eq!(v["ratio_band"]["lower"], 0.8);
    assert_eq!(v["difference_band"]["upper_pct"], 25.0);
}

#[test]
fn test_missing_columns_fail_with_all_names() {
    let table = Table::from_csv_str("Probe,Bemerkung\nGardasil 9,\n", ',').unwrap();
    let err = analyze(&table, SelectionMode::Batches, &AnalysisConfig::default()).unwrap_err();
    match err {
        AnalysisError::Schema { columns } => {
            assert_eq!(columns, vec!["Charge", "Pufferansatz", "Gehalt (U/ml)"]);
        }
        other => panic!("expected Schema, got {other:?}"),
    }
}

#[test]
fn test_one_sided_table_is_an_empty_result() {
    let csv = "\
Probe,Charge,Pufferansatz,Gehalt (U/ml),Bemerkung
Gardasil 9,B1,ZMB,4100,
Gardasil 9,B1,ZMB,4150,
";
    let table = Table::from_csv_str(csv, ',').unwrap();
    let err = analyze(&table, SelectionMode::Batches, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyResult { .. }));
}

#[test]
fn test_disjoint_batches_are_no_data() {
    let csv = "\
Probe,Charge,Pufferansatz,Gehalt (U/ml),Bemerkung
Gardasil 9,B1,ZMB,4100,
Gardasil 9,B2,INF3,4020,
";
    let table = Table::from_csv_str(csv, ',').unwrap();
    let err = analyze(&table, SelectionMode::Batches, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::NoData {
            zmb_records: 1,
            inf3_records: 1,
        }
    ));
}

#[test]
fn test_single_pair_is_insufficient() {
    let csv = "\
Probe,Charge,Pufferansatz,Gehalt (U/ml),Bemerkung
Gardasil 9,B1,ZMB,4100,
Gardasil 9,B1,INF3,4020,
";
    let table = Table::from_csv_str(csv, ',').unwrap();
    let err = analyze(&table, SelectionMode::Batches, &AnalysisConfig::default()).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InsufficientData {
            required: 2,
            actual: 1,
        }
    );
}

#[test]
fn test_negative_reading_names_its_batch() {
    let csv = "\
Probe,Charge,Pufferansatz,Gehalt (U/ml),Bemerkung
Gardasil 9,B1,ZMB,4100,
Gardasil 9,B1,INF3,4020,
Gardasil 9,B2,ZMB,-3950,
Gardasil 9,B2,INF3,4010,
";
    let table = Table::from_csv_str(csv, ',').unwrap();
    let err = analyze(&table, SelectionMode::Batches, &AnalysisConfig::default()).unwrap_err();
    match err {
        AnalysisError::InvalidValue { batch_id, value, .. } => {
            assert_eq!(batch_id.as_deref(), Some("B2"));
            assert_eq!(value, -3950.0);
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn test_custom_schema_renames_every_column() {
    let csv = "\
sample,lot,buffer,potency
vaccine,L1,REF,100
vaccine,L1,ALT,98
vaccine,L2,REF,110
vaccine,L2,ALT,112
";
    let table = Table::from_csv_str(csv, ',').unwrap();
    let mut cfg = AnalysisConfig::default();
    cfg.schema.group_column = "sample".to_string();
    cfg.schema.batch_column = "lot".to_string();
    cfg.schema.method_column = "buffer".to_string();
    cfg.schema.value_column = "potency".to_string();
    cfg.schema.remark_column = "note".to_string();
    cfg.schema.zmb_tag = "REF".to_string();
    cfg.schema.inf3_tag = "ALT".to_string();
    cfg.schema.vaccine_groups = vec!["vaccine".to_string()];

    let report = analyze(&table, SelectionMode::Batches, &cfg).unwrap();
    assert_eq!(report.n_pairs, 2);
}
