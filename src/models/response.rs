use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::scorer::FlightStatus;

/// Severity of the pilot shortage driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShortageSeverity {
    High,
    None,
}

/// The drivers behind a prediction, reported alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CriticalFactors {
    pub pilot_shortage_severity: ShortageSeverity,
    pub fdtl_fatigue_warning: bool,
}

/// Response of `POST /predict_risk`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskPrediction {
    pub flight_status_prediction: FlightStatus,
    /// Risk as a display percentage, e.g. `"70%"`.
    pub risk_probability: String,
    pub critical_factors: CriticalFactors,
    pub recommendation: String,
}
