use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{LogisticRegression, ModelError, Probabilistic};
use crate::preprocess::StandardScaler;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid model artifact: {0}")]
    Format(#[from] serde_json::Error),

    #[error("artifact is inconsistent: {0}")]
    Inconsistent(String),
}

/// Serialized logistic-regression model: scaler parameters and weights
/// together, so the artifact is a self-contained scoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticArtifact {
    pub feature_names: Vec<String>,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticArtifact {
    fn validate(&self) -> Result<(), PersistenceError> {
        let n = self.feature_names.len();
        if self.means.len() != n || self.scales.len() != n || self.weights.len() != n {
            return Err(PersistenceError::Inconsistent(format!(
                "{} feature names but {} means, {} scales, {} weights",
                n,
                self.means.len(),
                self.scales.len(),
                self.weights.len()
            )));
        }
        if self.scales.iter().any(|s| *s == 0.0) {
            return Err(PersistenceError::Inconsistent(
                "zero scale entry".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PersistenceError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let artifact: LogisticArtifact = serde_json::from_str(&contents)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| PersistenceError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Rebuild the scoring pipeline the artifact describes.
    pub fn into_model(self) -> ArtifactModel {
        ArtifactModel {
            scaler: StandardScaler::from_parameters(self.means, self.scales),
            model: LogisticRegression::from_parameters(self.weights, self.bias),
        }
    }
}

/// A deserialized artifact ready to score raw (unscaled) feature vectors.
pub struct ArtifactModel {
    scaler: StandardScaler,
    model: LogisticRegression,
}

impl Probabilistic for ArtifactModel {
    fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        let standardized = self.scaler.transform(features);
        self.model.positive_probability(&standardized)
    }
}

/// Demo stand-in used when no trained artifact exists on disk: a uniform
/// random probability per request. Callers must surface the degraded
/// mode to clients and operators.
pub struct RandomStandIn;

impl Probabilistic for RandomStandIn {
    fn positive_probability(&self, _features: &[f64]) -> Result<f64, ModelError> {
        Ok(rand::thread_rng().gen::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_artifact() -> LogisticArtifact {
        LogisticArtifact {
            feature_names: vec!["a".to_string(), "b".to_string()],
            means: vec![1.0, 2.0],
            scales: vec![0.5, 2.0],
            weights: vec![1.5, -0.5],
            bias: 0.25,
        }
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let artifact = sample_artifact();
        artifact.save(&path).unwrap();

        let loaded = LogisticArtifact::load(&path).unwrap();
        assert_eq!(loaded.feature_names, artifact.feature_names);
        assert_eq!(loaded.weights, artifact.weights);
        assert_eq!(loaded.bias, artifact.bias);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut artifact = sample_artifact();
        artifact.weights.pop();
        artifact.save(&path).unwrap();

        let err = LogisticArtifact::load(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Inconsistent(_)));
    }

    #[test]
    fn artifact_model_scores_raw_features() {
        let model = sample_artifact().into_model();
        let prob = model.positive_probability(&[1.0, 2.0]).unwrap();
        // At the column means the standardized vector is zero, so the
        // score is sigmoid(bias).
        let expected = 1.0 / (1.0 + (-0.25f64).exp());
        assert!((prob - expected).abs() < 1e-12);
    }

    #[test]
    fn stand_in_stays_in_range() {
        for _ in 0..100 {
            let p = RandomStandIn.positive_probability(&[0.0]).unwrap();
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
