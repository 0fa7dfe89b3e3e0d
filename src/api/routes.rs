use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use crate::service::RiskService;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root::welcome,
        handlers::root::health_check,
        handlers::predict::predict_risk,
    ),
    components(schemas(
        crate::models::PredictRiskRequest,
        crate::models::RiskPrediction,
        crate::models::CriticalFactors,
        crate::models::ShortageSeverity,
        crate::scorer::FlightStatus,
        crate::error::FieldViolation,
    )),
    tags(
        (name = "ops-shield", description = "Flight cancellation risk API")
    ),
    info(
        title = "IndiGo Ops Shield API",
        version = "0.1.0",
        description = "Predicts flight cancellation risks based on Crew FDTL & Weather parameters."
    )
)]
pub struct ApiDoc;

pub fn create_routes(service: Arc<RiskService>) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health_check))
        .route("/predict_risk", post(handlers::predict_risk))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
