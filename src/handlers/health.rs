use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

/// Liveness root: a static status message.
pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Disease Risk Predictor API is running"
    }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
