//! Offline training pipeline.
//!
//! One-shot run over the crisis dataset: load the CSV,
//! drop invalid routes, encode categoricals, engineer the shortage and
//! duty-flag features, stratified-split, scale, fit a logistic
//! regression and a random forest, report metrics, and persist the
//! fitted artifacts. Failures are fatal; there is no retry policy.
//!
//! The serving path does not consume these artifacts: the heuristic
//! scorer in [`crate::scorer`] stays the baseline, and the models
//! trained here are its statistical shadow.

pub mod artifacts;
pub mod dataset;
pub mod features;
pub mod forest;
pub mod logistic;
pub mod metrics;
pub mod pipeline;

pub use artifacts::ModelArtifact;
pub use dataset::FlightRecord;
pub use features::{Encoders, LabelEncoder, StandardScaler, TrainingSet};
pub use forest::{ForestConfig, RandomForest};
pub use logistic::LogisticRegression;
pub use pipeline::{TrainingConfig, TrainingReport};
