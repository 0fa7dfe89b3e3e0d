use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /predict_risk`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictRiskRequest {
    /// IATA code of origin
    #[schema(example = "DEL")]
    pub origin_airport: String,

    /// IATA code of destination
    #[schema(example = "BLR")]
    pub destination_airport: String,

    /// Minimum crew required
    #[schema(example = 2)]
    pub pilots_required: u32,

    /// Pilots currently available at hub
    #[schema(example = 1)]
    pub pilots_available: u32,

    /// Average duty hours of assigned crew (FDTL metric)
    #[schema(example = 10.2)]
    pub avg_duty_hours: f64,

    /// Aircraft model
    #[schema(example = "A321")]
    pub aircraft_type: String,
}
