//! End-to-end training run as one fallible call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{OpsError, Result};
use crate::training::artifacts::{self, ModelArtifact};
use crate::training::dataset;
use crate::training::features::{build_training_set, StandardScaler};
use crate::training::forest::{ForestConfig, RandomForest};
use crate::training::logistic::LogisticRegression;
use crate::training::metrics::{accuracy, classification_report, roc_auc, ClassMetrics};

/// Training run parameters.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub dataset_path: PathBuf,
    pub artifact_dir: PathBuf,
    pub test_ratio: f64,
    pub seed: u64,
    pub n_trees: usize,
}

impl TrainingConfig {
    fn validate(&self) -> Result<()> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(OpsError::training(format!(
                "test_ratio must be in (0, 1), got {}",
                self.test_ratio
            )));
        }
        if self.n_trees == 0 {
            return Err(OpsError::training("n_trees must be at least 1"));
        }
        Ok(())
    }
}

/// Holdout evaluation of one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEvaluation {
    pub accuracy: f64,
    pub roc_auc: f64,
    pub per_class: Vec<ClassMetrics>,
}

/// Summary of one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub n_records: usize,
    pub n_dropped: usize,
    pub cancellation_rate: f64,
    pub train_size: usize,
    pub test_size: usize,
    pub logistic: ModelEvaluation,
    pub forest: ModelEvaluation,
    /// Forest feature importances, highest first.
    pub feature_importances: Vec<(String, f64)>,
    pub trained_at: DateTime<Utc>,
}

/// Runs the full pipeline and persists the fitted artifacts. Any
/// failure aborts the run; there is no partial recovery.
pub fn run(config: &TrainingConfig) -> Result<TrainingReport> {
    config.validate()?;

    let records = dataset::load_records(&config.dataset_path)?;
    tracing::info!(rows = records.len(), "loaded dataset");

    let (set, encoders, n_dropped) = build_training_set(&records)?;
    let cancellation_rate =
        set.labels.iter().sum::<f64>() / set.n_samples() as f64;
    tracing::info!(
        kept = set.n_samples(),
        dropped = n_dropped,
        cancellation_rate = format!("{:.2}%", cancellation_rate * 100.0),
        "built feature matrix"
    );

    let (train, test) = set.stratified_split(config.test_ratio, config.seed);
    if train.n_samples() == 0 || test.n_samples() == 0 {
        return Err(OpsError::training(format!(
            "split produced empty partition (train={}, test={})",
            train.n_samples(),
            test.n_samples()
        )));
    }

    let mut scaler = StandardScaler::new();
    let x_train = scaler.fit_transform(&train.features_array())?;
    let x_test = scaler.transform(&test.features_array())?;
    let y_train = train.labels_array();
    let y_test = test.labels.clone();

    // Logistic regression
    let mut log_model = LogisticRegression::default();
    log_model.fit(&x_train, &y_train)?;
    let log_pred = log_model.predict(&x_test)?.to_vec();
    let log_prob = log_model.predict_proba(&x_test)?.to_vec();
    let logistic = ModelEvaluation {
        accuracy: accuracy(&y_test, &log_pred),
        roc_auc: roc_auc(&y_test, &log_prob),
        per_class: classification_report(&y_test, &log_pred),
    };
    tracing::info!(
        accuracy = logistic.accuracy,
        roc_auc = logistic.roc_auc,
        "logistic regression evaluated"
    );

    // Random forest
    let train_scaled = train.with_features(&x_train)?;
    let test_scaled = test.with_features(&x_test)?;
    let mut rf_model = RandomForest::new(ForestConfig {
        n_trees: config.n_trees,
        seed: config.seed,
        ..Default::default()
    });
    rf_model.fit(&train_scaled);
    let rf_pred = rf_model.predict(&test_scaled);
    let rf_prob = rf_model.predict_proba(&test_scaled);
    let forest = ModelEvaluation {
        accuracy: accuracy(&y_test, &rf_pred),
        roc_auc: roc_auc(&y_test, &rf_prob),
        per_class: classification_report(&y_test, &rf_pred),
    };
    tracing::info!(
        accuracy = forest.accuracy,
        roc_auc = forest.roc_auc,
        "random forest evaluated"
    );

    let feature_importances = rf_model.feature_importance_ranking();
    let trained_at = Utc::now();

    let artifact = ModelArtifact {
        forest: rf_model,
        encoders,
        feature_names: set.feature_names.clone(),
        trained_at,
    };
    artifacts::save(&config.artifact_dir, &artifact, &scaler)?;
    tracing::info!(dir = %config.artifact_dir.display(), "artifacts saved");

    Ok(TrainingReport {
        n_records: records.len(),
        n_dropped,
        cancellation_rate,
        train_size: train.n_samples(),
        test_size: test.n_samples(),
        logistic,
        forest,
        feature_importances,
        trained_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = TrainingConfig {
            dataset_path: PathBuf::from("flights.csv"),
            artifact_dir: PathBuf::from("artifacts"),
            test_ratio: 0.2,
            seed: 42,
            n_trees: 10,
        };
        assert!(config.validate().is_ok());

        config.test_ratio = 1.0;
        assert!(config.validate().is_err());

        config.test_ratio = 0.2;
        config.n_trees = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_dataset_aborts_run() {
        let config = TrainingConfig {
            dataset_path: PathBuf::from("/nonexistent/flights.csv"),
            artifact_dir: PathBuf::from("/tmp/unused"),
            test_ratio: 0.2,
            seed: 42,
            n_trees: 10,
        };
        assert!(run(&config).is_err());
    }
}
