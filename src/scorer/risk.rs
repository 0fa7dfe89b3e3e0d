//! Deterministic cancellation-risk scoring.
//!
//! The rule table below is the serving baseline: a base risk of 10%,
//! a 60-point spike when the flight is short on pilots, and a 25-point
//! fatigue penalty when average crew duty exceeds the FDTL trigger of
//! 9 hours. The cancel decision is taken on the unscaled base score,
//! so the 99-point display ceiling can never flip it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Base cancellation risk applied to every flight.
pub const BASE_RISK: f64 = 0.10;

/// Penalty added when required pilots exceed available pilots.
pub const SHORTAGE_PENALTY: f64 = 0.60;

/// Penalty added when average duty hours exceed the FDTL trigger.
pub const FATIGUE_PENALTY: f64 = 0.25;

/// FDTL fatigue trigger in hours. Strictly greater-than: 9.0 exactly
/// does not trigger.
pub const FDTL_DUTY_HOURS: f64 = 9.0;

/// Cancel decision threshold on the unscaled base score. Strictly
/// greater-than.
pub const CANCEL_THRESHOLD: f64 = 0.5;

/// Hard ceiling on the displayed risk score, in percentage points.
pub const RISK_CEILING: f64 = 99.0;

/// Predicted flight status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    OnTime,
    Cancelled,
}

/// Result of scoring one flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub status: FlightStatus,
    /// Risk in percentage points, clamped to `[0, 99]`.
    pub risk_score: f64,
    /// Raw `pilots_required - pilots_available`. Negative means
    /// surplus; callers clamp to 0 for presentation only.
    pub pilot_shortage: i64,
    /// True when `avg_duty_hours` exceeds the FDTL trigger.
    pub fatigue_warning: bool,
}

/// Scores a flight. Pure and total over the numeric domain: no I/O,
/// no state, no validation (that is the boundary's job).
pub fn score(pilots_required: u32, pilots_available: u32, avg_duty_hours: f64) -> RiskAssessment {
    let pilot_shortage = i64::from(pilots_required) - i64::from(pilots_available);
    let fatigue_warning = avg_duty_hours > FDTL_DUTY_HOURS;

    let mut base = BASE_RISK;
    if pilot_shortage > 0 {
        base += SHORTAGE_PENALTY;
    }
    if fatigue_warning {
        base += FATIGUE_PENALTY;
    }

    let risk_score = (base * 100.0).min(RISK_CEILING);
    let status = if base > CANCEL_THRESHOLD {
        FlightStatus::Cancelled
    } else {
        FlightStatus::OnTime
    };

    RiskAssessment {
        status,
        risk_score,
        pilot_shortage,
        fatigue_warning,
    }
}
