use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub dataset_path: String,
    pub artifact_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            dataset_path: std::env::var("DATASET_PATH")
                .unwrap_or_else(|_| "data/indigo_crisis_synthetic_dataset.csv".to_string()),
            artifact_dir: std::env::var("ARTIFACT_DIR")
                .unwrap_or_else(|_| "artifacts".to_string()),
        }
    }
}
