use super::{check_dimensions, dot, ModelError, Probabilistic};

/// Binary logistic regression fitted with full-batch gradient descent on
/// standardized features.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl LogisticRegression {
    /// `epochs` plays the role of the iteration cap in the reference
    /// models (200 for the diabetes ensemble, 300 for heart).
    pub fn fit(rows: &[Vec<f64>], targets: &[bool], epochs: usize, learning_rate: f64) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let n = rows.len() as f64;
        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;

        for _ in 0..epochs {
            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;
            for (row, &target) in rows.iter().zip(targets) {
                let y = if target { 1.0 } else { 0.0 };
                let residual = sigmoid(dot(&weights, row) + bias) - y;
                for (g, x) in grad_w.iter_mut().zip(row) {
                    *g += residual * x;
                }
                grad_b += residual;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= learning_rate * g / n;
            }
            bias -= learning_rate * grad_b / n;
        }

        LogisticRegression { weights, bias }
    }

    pub fn from_parameters(weights: Vec<f64>, bias: f64) -> Self {
        LogisticRegression { weights, bias }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl Probabilistic for LogisticRegression {
    fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_dimensions(self.weights.len(), features)?;
        Ok(sigmoid(dot(&self.weights, features) + self.bias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<Vec<f64>>, Vec<bool>) {
        let rows = vec![
            vec![-2.0, -1.5],
            vec![-1.8, -2.2],
            vec![-2.5, -1.0],
            vec![-1.2, -1.8],
            vec![2.0, 1.5],
            vec![1.8, 2.2],
            vec![2.5, 1.0],
            vec![1.2, 1.8],
        ];
        let targets = vec![false, false, false, false, true, true, true, true];
        (rows, targets)
    }

    #[test]
    fn separates_two_clusters() {
        let (rows, targets) = separable();
        let model = LogisticRegression::fit(&rows, &targets, 300, 0.5);

        assert!(model.positive_probability(&[2.0, 2.0]).unwrap() > 0.9);
        assert!(model.positive_probability(&[-2.0, -2.0]).unwrap() < 0.1);
    }

    #[test]
    fn rejects_wrong_dimension() {
        let (rows, targets) = separable();
        let model = LogisticRegression::fit(&rows, &targets, 10, 0.5);
        let err = model.positive_probability(&[1.0]).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }
}
