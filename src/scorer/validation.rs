//! Boundary validation for scoring inputs.
//!
//! The scorer itself is total and performs no checks; every violated
//! constraint is collected here and reported in one pass, so a client
//! sees the full list rather than the first failure.

use crate::error::{FieldViolation, OpsError, Result};
use crate::models::PredictRiskRequest;

/// Upper bound (exclusive) on average duty hours.
pub const MAX_DUTY_HOURS: f64 = 24.0;

/// Minimum crew a flight can be scheduled with.
pub const MIN_PILOTS_REQUIRED: u32 = 2;

/// Validated scorer input. Construction goes through [`validate`];
/// the scorer never sees an unchecked request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightRiskInput {
    pub pilots_required: u32,
    pub pilots_available: u32,
    pub avg_duty_hours: f64,
}

/// Validates a prediction request, returning every violated constraint.
pub fn validate(request: &PredictRiskRequest) -> Result<FlightRiskInput> {
    let mut violations = Vec::new();

    if request.pilots_required < MIN_PILOTS_REQUIRED {
        violations.push(FieldViolation::new(
            "pilots_required",
            format!("must be >= {MIN_PILOTS_REQUIRED}"),
        ));
    }

    if !request.avg_duty_hours.is_finite() {
        violations.push(FieldViolation::new("avg_duty_hours", "must be a finite number"));
    } else if request.avg_duty_hours < 0.0 {
        violations.push(FieldViolation::new("avg_duty_hours", "must be >= 0"));
    } else if request.avg_duty_hours >= MAX_DUTY_HOURS {
        violations.push(FieldViolation::new(
            "avg_duty_hours",
            format!("must be < {MAX_DUTY_HOURS}"),
        ));
    }

    if request.origin_airport.trim().is_empty() {
        violations.push(FieldViolation::new("origin_airport", "must not be empty"));
    }
    if request.destination_airport.trim().is_empty() {
        violations.push(FieldViolation::new(
            "destination_airport",
            "must not be empty",
        ));
    } else if request.origin_airport == request.destination_airport {
        // Same-route rows are invalid in the training data too.
        violations.push(FieldViolation::new(
            "destination_airport",
            "must differ from origin_airport",
        ));
    }

    if violations.is_empty() {
        Ok(FlightRiskInput {
            pilots_required: request.pilots_required,
            pilots_available: request.pilots_available,
            avg_duty_hours: request.avg_duty_hours,
        })
    } else {
        Err(OpsError::Validation(violations))
    }
}
