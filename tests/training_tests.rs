use ops_shield::training::artifacts::{self, MODEL_FILE, SCALER_FILE};
use ops_shield::training::pipeline::{self, TrainingConfig};
use std::io::Write;
use std::path::Path;

const HEADER: &str = "date,origin_airport,destination_airport,aircraft_type,\
scheduled_departure_hour,delay_minutes,pilots_required,pilots_available,\
avg_duty_hours,rest_violation_flag,weather_severity,holiday_flag,cancelled";

/// Writes a dataset where cancellations follow the crew-shortage rule,
/// so a working pipeline must beat the base rate by a wide margin.
fn write_dataset(path: &Path, n_rows: usize, n_same_route: usize) {
    let routes = [("DEL", "BOM"), ("BOM", "BLR"), ("BLR", "DEL"), ("DEL", "CCU")];
    let aircraft = ["A320", "A321"];

    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "{HEADER}").unwrap();

    for i in 0..n_rows {
        let (origin, dest) = routes[i % routes.len()];
        let tail = aircraft[i % aircraft.len()];
        let hour = 5 + (i % 18);
        let delay = (i % 7) as f64 * 11.0;
        let weather = (i % 10) as f64 / 10.0;

        // Every third row is short one pilot and gets cancelled.
        let short = i % 3 == 0;
        let (required, available) = if short { (2, 1) } else { (2, 2) };
        let duty = if i % 4 == 0 { 10.5 } else { 7.5 };
        let cancelled = u8::from(short);

        writeln!(
            file,
            "2024-01-{:02},{origin},{dest},{tail},{hour},{delay},{required},{available},{duty},{},{weather},{},{cancelled}",
            1 + i % 28,
            u8::from(duty > 9.0),
            u8::from(i % 11 == 0),
        )
        .unwrap();
    }

    // Rows the pipeline must drop before training
    for _ in 0..n_same_route {
        writeln!(file, "2024-02-01,DEL,DEL,A320,6,0.0,2,2,8.0,0,0.2,0,0").unwrap();
    }
}

fn config(dataset: &Path, artifacts: &Path) -> TrainingConfig {
    TrainingConfig {
        dataset_path: dataset.to_path_buf(),
        artifact_dir: artifacts.to_path_buf(),
        test_ratio: 0.2,
        seed: 42,
        n_trees: 25,
    }
}

#[test]
fn test_pipeline_learns_the_shortage_rule() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("flights.csv");
    let artifact_dir = dir.path().join("artifacts");
    write_dataset(&dataset, 300, 5);

    let report = pipeline::run(&config(&dataset, &artifact_dir)).unwrap();

    assert_eq!(report.n_records, 305);
    assert_eq!(report.n_dropped, 5);
    assert_eq!(report.train_size + report.test_size, 300);

    // One row in three is cancelled
    assert!((report.cancellation_rate - 1.0 / 3.0).abs() < 0.02);

    // The label is a pure function of pilot_shortage, so both models
    // should be close to perfect on the holdout.
    assert!(report.forest.accuracy > 0.95, "forest accuracy {}", report.forest.accuracy);
    assert!(report.forest.roc_auc > 0.95, "forest roc_auc {}", report.forest.roc_auc);
    assert!(report.logistic.accuracy > 0.9, "logistic accuracy {}", report.logistic.accuracy);
}

#[test]
fn test_pipeline_persists_loadable_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("flights.csv");
    let artifact_dir = dir.path().join("artifacts");
    write_dataset(&dataset, 200, 0);

    let report = pipeline::run(&config(&dataset, &artifact_dir)).unwrap();

    assert!(artifact_dir.join(MODEL_FILE).exists());
    assert!(artifact_dir.join(SCALER_FILE).exists());

    let (artifact, _scaler) = artifacts::load(&artifact_dir).unwrap();
    assert_eq!(artifact.forest.n_trees(), 25);
    assert_eq!(artifact.feature_names.len(), 13);
    assert_eq!(artifact.trained_at, report.trained_at);
    assert!(artifact.encoders.origin.classes().contains(&"DEL".to_string()));
}

#[test]
fn test_importances_rank_the_shortage_signals_first() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("flights.csv");
    let artifact_dir = dir.path().join("artifacts");
    write_dataset(&dataset, 300, 0);

    let report = pipeline::run(&config(&dataset, &artifact_dir)).unwrap();

    let total: f64 = report.feature_importances.iter().map(|(_, v)| v).sum();
    assert!((total - 1.0).abs() < 1e-9);

    // The label only depends on crew columns, so one of them must
    // dominate the ranking.
    let (top_name, top_importance) = &report.feature_importances[0];
    assert!(
        ["pilot_shortage", "pilots_available", "pilots_required"]
            .contains(&top_name.as_str()),
        "unexpected top feature: {top_name}"
    );
    assert!(*top_importance > 0.2);
}

#[test]
fn test_single_class_dataset_still_trains() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("flights.csv");
    let artifact_dir = dir.path().join("artifacts");

    let mut file = std::fs::File::create(&dataset).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for i in 0..20 {
        writeln!(
            file,
            "2024-01-{:02},DEL,BOM,A320,6,0.0,2,2,8.0,0,0.2,0,0",
            1 + i
        )
        .unwrap();
    }

    let report = pipeline::run(&config(&dataset, &artifact_dir)).unwrap();

    // Trivially perfect accuracy; ROC-AUC degrades to 0.5 when the
    // holdout has a single class.
    assert_eq!(report.cancellation_rate, 0.0);
    assert!((report.forest.accuracy - 1.0).abs() < 1e-12);
    assert!((report.forest.roc_auc - 0.5).abs() < 1e-12);
}
