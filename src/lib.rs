//! Flight cancellation risk service.
//!
//! One shared risk-scoring contract (`scorer`) consumed by the HTTP
//! prediction API, plus an offline training pipeline that fits a
//! logistic regression and a random forest on the synthetic crisis
//! dataset and persists the artifacts.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod scorer;
pub mod service;
pub mod training;

pub use config::Config;
pub use error::{FieldViolation, OpsError, Result};
pub use service::RiskService;
