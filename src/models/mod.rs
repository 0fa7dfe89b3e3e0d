pub mod request;
pub mod response;

pub use request::PredictRiskRequest;
pub use response::{CriticalFactors, RiskPrediction, ShortageSeverity};
