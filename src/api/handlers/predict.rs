use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{PredictRiskRequest, RiskPrediction};
use crate::service::RiskService;

/// Predict cancellation risk for one flight
#[utoipa::path(
    post,
    path = "/predict_risk",
    request_body = PredictRiskRequest,
    responses(
        (status = 200, description = "Risk assessment produced", body = RiskPrediction),
        (status = 422, description = "One or more request constraints violated"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn predict_risk(
    State(service): State<Arc<RiskService>>,
    Json(request): Json<PredictRiskRequest>,
) -> Result<(StatusCode, Json<RiskPrediction>)> {
    let prediction = service.predict(&request)?;
    Ok((StatusCode::OK, Json(prediction)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShortageSeverity;
    use crate::scorer::FlightStatus;

    fn request(required: u32, available: u32, duty: f64) -> PredictRiskRequest {
        PredictRiskRequest {
            origin_airport: "DEL".to_string(),
            destination_airport: "BLR".to_string(),
            pilots_required: required,
            pilots_available: available,
            avg_duty_hours: duty,
            aircraft_type: "A321".to_string(),
        }
    }

    #[tokio::test]
    async fn test_predict_risk_handler_cancelled() {
        let service = Arc::new(RiskService::new());
        let result = predict_risk(State(service), Json(request(4, 1, 10.0))).await;

        let (status, response) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response.0.flight_status_prediction,
            FlightStatus::Cancelled
        );
        assert_eq!(response.0.risk_probability, "95%");
        assert_eq!(
            response.0.critical_factors.pilot_shortage_severity,
            ShortageSeverity::High
        );
    }

    #[tokio::test]
    async fn test_predict_risk_handler_rejects_bad_input() {
        let service = Arc::new(RiskService::new());
        let result = predict_risk(State(service), Json(request(1, 1, 30.0))).await;
        assert!(result.is_err());
    }
}
