use crate::error::Result;
use crate::models::{CriticalFactors, PredictRiskRequest, RiskPrediction, ShortageSeverity};
use crate::scorer::{self, FlightStatus};

/// Advice returned when a cancellation is predicted.
pub const RECOMMEND_CANCELLED: &str = "Urgent: Assign reserve crew or delay departure.";

/// Advice returned for on-time predictions.
pub const RECOMMEND_ON_TIME: &str = "Operations Normal";

/// Serving layer: validates a request, runs the shared scorer, and
/// shapes the wire response. Stateless; one instance is shared by all
/// handlers.
#[derive(Debug, Default)]
pub struct RiskService;

impl RiskService {
    pub fn new() -> Self {
        Self
    }

    /// Validates and scores one flight.
    pub fn predict(&self, request: &PredictRiskRequest) -> Result<RiskPrediction> {
        let input = scorer::validate(request)?;
        let assessment = scorer::score(
            input.pilots_required,
            input.pilots_available,
            input.avg_duty_hours,
        );

        let pilot_shortage_severity = if assessment.pilot_shortage > 0 {
            ShortageSeverity::High
        } else {
            ShortageSeverity::None
        };

        let recommendation = match assessment.status {
            FlightStatus::Cancelled => RECOMMEND_CANCELLED,
            FlightStatus::OnTime => RECOMMEND_ON_TIME,
        };

        Ok(RiskPrediction {
            flight_status_prediction: assessment.status,
            risk_probability: format!("{:.0}%", assessment.risk_score),
            critical_factors: CriticalFactors {
                pilot_shortage_severity,
                fdtl_fatigue_warning: assessment.fatigue_warning,
            },
            recommendation: recommendation.to_string(),
        })
    }
}
