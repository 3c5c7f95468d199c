use tracing::warn;

use crate::models::ModelHandle;
use crate::risk::aggregator::round2;

/// A fixed, ordered set of independently fitted classifiers sharing one
/// input schema. Scoring is a read-only query against fitted state, so
/// concurrent requests need no synchronization.
pub struct ModelEnsemble {
    models: Vec<ModelHandle>,
}

impl ModelEnsemble {
    pub fn new(models: Vec<ModelHandle>) -> Self {
        ModelEnsemble { models }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    /// Score a standardized feature vector with every model, in model
    /// order, as percentages rounded to 2 decimals. A model that fails
    /// contributes 0.0 and is logged; partial model failure never fails
    /// the whole request.
    pub fn score(&self, standardized: &[f64]) -> Vec<(String, f64)> {
        self.models
            .iter()
            .map(|model| {
                let percent = match model.positive_probability(standardized) {
                    Ok(prob) => round2(prob * 100.0),
                    Err(err) => {
                        warn!(model = %model.name, error = %err, "model failed during scoring");
                        0.0
                    }
                };
                (model.name.clone(), percent)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelError, Probabilistic};

    struct Fixed(f64);

    impl Probabilistic for Fixed {
        fn positive_probability(&self, _features: &[f64]) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    struct AlwaysFails;

    impl Probabilistic for AlwaysFails {
        fn positive_probability(&self, _features: &[f64]) -> Result<f64, ModelError> {
            Err(ModelError::Scoring("deliberately broken".to_string()))
        }
    }

    #[test]
    fn scores_every_model_in_order_as_percentages() {
        let ensemble = ModelEnsemble::new(vec![
            ModelHandle::probabilistic("A", Fixed(0.25)),
            ModelHandle::probabilistic("B", Fixed(0.666666)),
        ]);
        let scores = ensemble.score(&[0.0]);
        assert_eq!(
            scores,
            vec![("A".to_string(), 25.0), ("B".to_string(), 66.67)]
        );
    }

    #[test]
    fn failing_model_contributes_zero_without_aborting() {
        let ensemble = ModelEnsemble::new(vec![
            ModelHandle::probabilistic("Good", Fixed(0.8)),
            ModelHandle::probabilistic("Broken", AlwaysFails),
            ModelHandle::probabilistic("Also Good", Fixed(0.4)),
        ]);
        let scores = ensemble.score(&[0.0]);
        assert_eq!(
            scores,
            vec![
                ("Good".to_string(), 80.0),
                ("Broken".to_string(), 0.0),
                ("Also Good".to_string(), 40.0),
            ]
        );
    }
}
