use std::collections::BTreeMap;

use axum::{body::Bytes, extract::State, response::Json};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::domains::{breast::BreastReport, RiskReport};
use crate::error::ApiError;
use crate::AppState;

#[derive(Serialize)]
pub struct EnsembleResponse {
    pub risks: BTreeMap<String, f64>,
    #[serde(rename = "averageRisk")]
    pub average_risk: f64,
    #[serde(rename = "finalStatus")]
    pub final_status: String,
}

impl From<RiskReport> for EnsembleResponse {
    fn from(report: RiskReport) -> Self {
        EnsembleResponse {
            risks: report.risks.into_iter().collect(),
            average_risk: report.average_risk,
            final_status: report.final_status.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct BreastResponse {
    #[serde(rename = "averageRisk")]
    pub average_risk: f64,
    #[serde(rename = "finalStatus")]
    pub final_status: String,
    pub degraded: bool,
}

impl From<BreastReport> for BreastResponse {
    fn from(report: BreastReport) -> Self {
        BreastResponse {
            average_risk: report.average_risk,
            final_status: report.final_status,
            degraded: report.degraded,
        }
    }
}

/// Strict domains require a JSON object body; anything else is the
/// request's fault and goes through the 400 error channel.
fn require_object(body: &Bytes) -> Result<Map<String, Value>, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::Internal(format!("invalid JSON body: {err}")))?;
    value
        .as_object()
        .cloned()
        .ok_or_else(|| ApiError::Internal("request body must be a JSON object".to_string()))
}

/// The lenient domain tolerates a missing, empty, or malformed body and
/// treats it as an empty object so every field is imputed.
fn object_or_empty(body: &Bytes) -> Map<String, Value> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default()
}

pub async fn predict_diabetes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EnsembleResponse>, ApiError> {
    let payload = require_object(&body)?;
    let report = state.diabetes.score_request(&payload)?;
    info!(
        average = report.average_risk,
        status = report.final_status,
        "diabetes prediction served"
    );
    Ok(Json(report.into()))
}

pub async fn predict_heart(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EnsembleResponse>, ApiError> {
    let payload = object_or_empty(&body);
    let report = state.heart.score_request(&payload)?;
    info!(
        average = report.average_risk,
        status = report.final_status,
        "heart-disease prediction served"
    );
    Ok(Json(report.into()))
}

pub async fn predict_breast(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BreastResponse>, ApiError> {
    let payload = require_object(&body)?;
    let report = state.breast.score_request(&payload)?;
    info!(
        average = report.average_risk,
        status = %report.final_status,
        degraded = report.degraded,
        "breast-cancer prediction served"
    );
    Ok(Json(report.into()))
}
