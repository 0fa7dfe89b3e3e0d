use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Welcome endpoint
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message")
    )
)]
pub async fn welcome() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Welcome to IndiGo Ops Shield. Go to /swagger-ui for the interactive dashboard.",
        })),
    )
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "ops-shield",
        })),
    )
}
