//! Persistence for fitted training artifacts.
//!
//! Two JSON files: the model file carries the forest plus everything
//! needed to rebuild its feature space (encoders and column order),
//! the scaler file carries the fitted standardization parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::training::features::{Encoders, StandardScaler};
use crate::training::forest::RandomForest;

pub const MODEL_FILE: &str = "cancellation_model.json";
pub const SCALER_FILE: &str = "scaler.json";

/// The fitted classifier together with its feature-space metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub forest: RandomForest,
    pub encoders: Encoders,
    pub feature_names: Vec<String>,
    pub trained_at: DateTime<Utc>,
}

/// Writes the model and scaler files into `dir`, creating it if needed.
pub fn save(dir: &Path, artifact: &ModelArtifact, scaler: &StandardScaler) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let model_file = File::create(dir.join(MODEL_FILE))?;
    serde_json::to_writer(BufWriter::new(model_file), artifact)?;

    let scaler_file = File::create(dir.join(SCALER_FILE))?;
    serde_json::to_writer(BufWriter::new(scaler_file), scaler)?;

    Ok(())
}

/// Loads a previously saved model/scaler pair from `dir`.
pub fn load(dir: &Path) -> Result<(ModelArtifact, StandardScaler)> {
    let model_file = File::open(dir.join(MODEL_FILE))?;
    let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(model_file))?;

    let scaler_file = File::open(dir.join(SCALER_FILE))?;
    let scaler: StandardScaler = serde_json::from_reader(BufReader::new(scaler_file))?;

    Ok((artifact, scaler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::features::{LabelEncoder, TrainingSet};
    use crate::training::forest::ForestConfig;

    fn tiny_artifact() -> (ModelArtifact, StandardScaler) {
        let set = TrainingSet {
            features: vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]],
            labels: vec![0.0, 0.0, 1.0, 1.0],
            feature_names: vec!["x".to_string()],
        };
        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 3,
            max_depth: 3,
            ..Default::default()
        });
        forest.fit(&set);

        let mut scaler = StandardScaler::new();
        scaler.fit(&set.features_array());

        let artifact = ModelArtifact {
            forest,
            encoders: Encoders {
                origin: LabelEncoder::fit(["DEL", "BOM"]),
                destination: LabelEncoder::fit(["DEL", "BOM"]),
                aircraft: LabelEncoder::fit(["A320"]),
            },
            feature_names: vec!["x".to_string()],
            trained_at: Utc::now(),
        };
        (artifact, scaler)
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (artifact, scaler) = tiny_artifact();

        save(dir.path(), &artifact, &scaler).unwrap();
        let (loaded, loaded_scaler) = load(dir.path()).unwrap();

        assert_eq!(loaded.forest.n_trees(), artifact.forest.n_trees());
        assert_eq!(loaded.feature_names, artifact.feature_names);
        assert_eq!(
            loaded.forest.predict_proba_one(&[2.5]),
            artifact.forest.predict_proba_one(&[2.5])
        );

        let x = ndarray::array![[1.5]];
        assert_eq!(
            loaded_scaler.transform(&x).unwrap(),
            scaler.transform(&x).unwrap()
        );
    }

    #[test]
    fn test_load_missing_dir_is_error() {
        let result = load(Path::new("/nonexistent/artifacts"));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let (artifact, scaler) = tiny_artifact();
        save(dir.path(), &artifact, &scaler).unwrap();

        assert!(dir.path().join(MODEL_FILE).exists());
        assert!(dir.path().join(SCALER_FILE).exists());
    }
}
