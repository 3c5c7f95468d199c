pub mod forest;
pub mod knn;
pub mod logistic;
pub mod naive_bayes;
pub mod persistence;
pub mod svm;
pub mod tree;

pub use forest::RandomForest;
pub use knn::KNearestNeighbors;
pub use logistic::LogisticRegression;
pub use naive_bayes::GaussianNaiveBayes;
pub use svm::LinearSvc;
pub use tree::DecisionTree;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("model produced a non-finite score")]
    NonFiniteScore,

    #[error("{0}")]
    Scoring(String),
}

/// A classifier that estimates P(positive class) directly.
pub trait Probabilistic: Send + Sync {
    fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError>;
}

/// A classifier that only emits a hard binary decision.
pub trait DecisionOnly: Send + Sync {
    fn decide(&self, features: &[f64]) -> Result<bool, ModelError>;
}

/// Capability of a fitted model, resolved once when the handle is built
/// rather than re-checked per request.
pub enum ModelKind {
    Probabilistic(Box<dyn Probabilistic>),
    DecisionOnly(Box<dyn DecisionOnly>),
}

/// An opaque fitted binary classifier with a human-readable name.
/// Created once at startup and read-only thereafter.
pub struct ModelHandle {
    pub name: String,
    kind: ModelKind,
}

impl ModelHandle {
    pub fn probabilistic(name: impl Into<String>, model: impl Probabilistic + 'static) -> Self {
        ModelHandle {
            name: name.into(),
            kind: ModelKind::Probabilistic(Box::new(model)),
        }
    }

    pub fn decision_only(name: impl Into<String>, model: impl DecisionOnly + 'static) -> Self {
        ModelHandle {
            name: name.into(),
            kind: ModelKind::DecisionOnly(Box::new(model)),
        }
    }

    /// P(positive) in [0,1]. A decision-only model maps a positive
    /// decision to 1.0 and a negative one to 0.0.
    pub fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        let prob = match &self.kind {
            ModelKind::Probabilistic(model) => model.positive_probability(features)?,
            ModelKind::DecisionOnly(model) => {
                if model.decide(features)? {
                    1.0
                } else {
                    0.0
                }
            }
        };
        if !prob.is_finite() {
            return Err(ModelError::NonFiniteScore);
        }
        Ok(prob.clamp(0.0, 1.0))
    }
}

pub(crate) fn check_dimensions(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

pub(crate) fn dot(weights: &[f64], features: &[f64]) -> f64 {
    weights.iter().zip(features).map(|(w, x)| w * x).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysYes;

    impl DecisionOnly for AlwaysYes {
        fn decide(&self, _features: &[f64]) -> Result<bool, ModelError> {
            Ok(true)
        }
    }

    struct HalfSure;

    impl Probabilistic for HalfSure {
        fn positive_probability(&self, _features: &[f64]) -> Result<f64, ModelError> {
            Ok(0.5)
        }
    }

    #[test]
    fn decision_only_maps_to_unit_probabilities() {
        let handle = ModelHandle::decision_only("stub", AlwaysYes);
        assert_eq!(handle.positive_probability(&[0.0]).unwrap(), 1.0);
    }

    #[test]
    fn probabilistic_passes_through() {
        let handle = ModelHandle::probabilistic("stub", HalfSure);
        assert_eq!(handle.positive_probability(&[0.0]).unwrap(), 0.5);
    }
}
