use axum::{http::StatusCode, response::Json};
use serde_json::json;

/// GET /health
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "error_responder",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
