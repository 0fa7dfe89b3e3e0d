//! The risk-scoring contract shared by every serving surface.
//!
//! All callers (the HTTP API and any interactive front end) must go
//! through [`risk::score`] so the decision rule exists in exactly one
//! place. Input validation lives next to it in [`validation`] and runs
//! at the boundary, before the scorer is invoked.

pub mod risk;
pub mod validation;

pub use risk::{score, FlightStatus, RiskAssessment};
pub use validation::{validate, FlightRiskInput};
