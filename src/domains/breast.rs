use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{ApiError, InitError};
use crate::models::persistence::{LogisticArtifact, RandomStandIn};
use crate::models::ModelHandle;
use crate::preprocess::extract_strict;
use crate::risk::{round2, RiskBand, RiskBands};

/// Request field names, in the order the persisted model was fitted.
pub const FIELDS: [&str; 10] = [
    "radius_mean",
    "texture_mean",
    "perimeter_mean",
    "area_mean",
    "smoothness_mean",
    "compactness_mean",
    "concavity_mean",
    "concave_points_mean",
    "symmetry_mean",
    "fractal_dimension_mean",
];

/// Classified on the raw probability (0-1 scale), unlike the ensemble
/// domains which classify the averaged percentage.
pub const BANDS: RiskBands = RiskBands::new(
    &[
        RiskBand {
            upper: 0.3,
            label: "Low Risk",
        },
        RiskBand {
            upper: 0.7,
            label: "Medium Risk",
        },
    ],
    "High Risk",
);

/// Single-model serving context for the breast-cancer domain. The model
/// is either a persisted artifact or, when none exists on disk, a random
/// stand-in that is flagged as degraded in every response.
pub struct BreastContext {
    pub fields: &'static [&'static str],
    model: ModelHandle,
    bands: RiskBands,
    pub degraded: bool,
}

#[derive(Debug, Clone)]
pub struct BreastReport {
    pub average_risk: f64,
    pub final_status: String,
    pub degraded: bool,
}

impl BreastContext {
    pub fn from_artifact(artifact: LogisticArtifact) -> Result<Self, InitError> {
        if artifact.feature_names.len() != FIELDS.len() {
            return Err(InitError::SchemaMismatch {
                domain: "breast",
                expected: FIELDS.len(),
                actual: artifact.feature_names.len(),
            });
        }
        Ok(BreastContext {
            fields: &FIELDS,
            model: ModelHandle::probabilistic("Breast Model", artifact.into_model()),
            bands: BANDS,
            degraded: false,
        })
    }

    /// Demo fallback: uniform random probabilities, surfaced to clients
    /// via `degraded: true` rather than silently.
    pub fn degraded_stand_in() -> Self {
        BreastContext {
            fields: &FIELDS,
            model: ModelHandle::probabilistic("Breast Model", RandomStandIn),
            bands: BANDS,
            degraded: true,
        }
    }

    pub fn score_request(&self, payload: &Map<String, Value>) -> Result<BreastReport, ApiError> {
        let raw = extract_strict(payload, self.fields)?;
        // Single model: a scoring failure has nothing to fall back on,
        // so it terminates the request through the generic error channel.
        let prob = self
            .model
            .positive_probability(&raw)
            .map_err(|err| ApiError::Internal(err.to_string()))?;

        let average_risk = round2(prob * 100.0);
        let label = self.bands.classify(prob);
        Ok(BreastReport {
            average_risk,
            final_status: format!("{label} ({average_risk}%)"),
            degraded: self.degraded,
        })
    }
}

pub fn build(settings: &Settings) -> Result<BreastContext, InitError> {
    let path = Path::new(&settings.models.breast_artifact);
    if path.exists() {
        let artifact = LogisticArtifact::load(path)?;
        let context = BreastContext::from_artifact(artifact)?;
        info!(path = %path.display(), "breast-cancer model loaded");
        Ok(context)
    } else {
        warn!(
            path = %path.display(),
            "no trained breast-cancer model found, serving random demo predictions"
        );
        Ok(BreastContext::degraded_stand_in())
    }
}
