use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{check_dimensions, dot, DecisionOnly, ModelError};

/// Linear support vector classifier trained with the Pegasos
/// sub-gradient method. Emits the margin sign only, so it is registered
/// with the ensemble as a decision-only model and exercises the binary
/// fallback path.
#[derive(Debug, Clone)]
pub struct LinearSvc {
    weights: Vec<f64>,
    bias: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct SvcParams {
    pub epochs: usize,
    pub lambda: f64,
    pub seed: u64,
}

impl Default for SvcParams {
    fn default() -> Self {
        SvcParams {
            epochs: 100,
            lambda: 0.01,
            seed: 42,
        }
    }
}

impl LinearSvc {
    pub fn fit(rows: &[Vec<f64>], targets: &[bool], params: SvcParams) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut order: Vec<usize> = (0..rows.len()).collect();

        let mut t = 0usize;
        for _ in 0..params.epochs {
            order.shuffle(&mut rng);
            for &i in &order {
                t += 1;
                let eta = 1.0 / (params.lambda * t as f64);
                let y = if targets[i] { 1.0 } else { -1.0 };
                let margin = y * (dot(&weights, &rows[i]) + bias);

                for w in weights.iter_mut() {
                    *w *= 1.0 - eta * params.lambda;
                }
                if margin < 1.0 {
                    for (w, x) in weights.iter_mut().zip(&rows[i]) {
                        *w += eta * y * x;
                    }
                    bias += eta * y;
                }
            }
        }

        LinearSvc { weights, bias }
    }
}

impl DecisionOnly for LinearSvc {
    fn decide(&self, features: &[f64]) -> Result<bool, ModelError> {
        check_dimensions(self.weights.len(), features)?;
        Ok(dot(&self.weights, features) + self.bias > 0.0)
    }
}
