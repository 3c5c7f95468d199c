use super::{check_dimensions, ModelError, Probabilistic};

/// Gaussian naive Bayes. Per-class feature means and variances with a
/// small variance floor so a feature that is constant within a class
/// does not collapse the likelihood.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    positive: ClassStats,
    negative: ClassStats,
    n_features: usize,
}

#[derive(Debug, Clone)]
struct ClassStats {
    log_prior: f64,
    means: Vec<f64>,
    variances: Vec<f64>,
}

impl ClassStats {
    fn fit(rows: &[&Vec<f64>], n_features: usize, total: usize, var_floor: f64) -> Self {
        if rows.is_empty() {
            // Absent class: zero prior, so it can never win the posterior.
            return ClassStats {
                log_prior: f64::NEG_INFINITY,
                means: vec![0.0; n_features],
                variances: vec![1.0; n_features],
            };
        }
        let n = rows.len() as f64;
        let mut means = vec![0.0; n_features];
        for row in rows {
            for (acc, value) in means.iter_mut().zip(row.iter()) {
                *acc += value;
            }
        }
        for acc in &mut means {
            *acc /= n;
        }
        let mut variances = vec![0.0; n_features];
        for row in rows {
            for ((acc, value), mean) in variances.iter_mut().zip(row.iter()).zip(&means) {
                *acc += (value - mean).powi(2);
            }
        }
        for acc in &mut variances {
            *acc = *acc / n + var_floor;
        }
        ClassStats {
            log_prior: (n / total as f64).ln(),
            means,
            variances,
        }
    }

    fn joint_log_likelihood(&self, features: &[f64]) -> f64 {
        if self.log_prior == f64::NEG_INFINITY {
            return f64::NEG_INFINITY;
        }
        let mut ll = self.log_prior;
        for ((x, mean), var) in features.iter().zip(&self.means).zip(&self.variances) {
            ll -= 0.5 * ((2.0 * std::f64::consts::PI * var).ln() + (x - mean).powi(2) / var);
        }
        ll
    }
}

impl GaussianNaiveBayes {
    pub fn fit(rows: &[Vec<f64>], targets: &[bool]) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);

        // Variance smoothing relative to the largest overall feature
        // variance, the standard stabilizer for Gaussian NB.
        let n = rows.len() as f64;
        let mut max_var: f64 = 0.0;
        for j in 0..n_features {
            let mean: f64 = rows.iter().map(|r| r[j]).sum::<f64>() / n;
            let var: f64 = rows.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / n;
            max_var = max_var.max(var);
        }
        let var_floor = 1e-9 * max_var.max(1.0);

        let positives: Vec<&Vec<f64>> = rows
            .iter()
            .zip(targets)
            .filter(|(_, &t)| t)
            .map(|(r, _)| r)
            .collect();
        let negatives: Vec<&Vec<f64>> = rows
            .iter()
            .zip(targets)
            .filter(|(_, &t)| !t)
            .map(|(r, _)| r)
            .collect();

        GaussianNaiveBayes {
            positive: ClassStats::fit(&positives, n_features, rows.len(), var_floor),
            negative: ClassStats::fit(&negatives, n_features, rows.len(), var_floor),
            n_features,
        }
    }
}

impl Probabilistic for GaussianNaiveBayes {
    fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_dimensions(self.n_features, features)?;

        let pos = self.positive.joint_log_likelihood(features);
        let neg = self.negative.joint_log_likelihood(features);
        if pos == f64::NEG_INFINITY && neg == f64::NEG_INFINITY {
            return Err(ModelError::Scoring(
                "no class statistics available".to_string(),
            ));
        }

        // Normalize in log space to avoid under/overflow.
        let max = pos.max(neg);
        let pos_exp = (pos - max).exp();
        let neg_exp = (neg - max).exp();
        Ok(pos_exp / (pos_exp + neg_exp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_two_gaussian_clusters() {
        let rows = vec![
            vec![-2.0, -2.1],
            vec![-1.9, -2.0],
            vec![-2.2, -1.8],
            vec![2.0, 2.1],
            vec![1.9, 2.0],
            vec![2.2, 1.8],
        ];
        let targets = vec![false, false, false, true, true, true];
        let model = GaussianNaiveBayes::fit(&rows, &targets);

        assert!(model.positive_probability(&[2.0, 2.0]).unwrap() > 0.95);
        assert!(model.positive_probability(&[-2.0, -2.0]).unwrap() < 0.05);
    }

    #[test]
    fn single_class_training_pins_the_posterior() {
        let rows = vec![vec![1.0], vec![2.0]];
        let targets = vec![true, true];
        let model = GaussianNaiveBayes::fit(&rows, &targets);
        assert_eq!(model.positive_probability(&[1.5]).unwrap(), 1.0);
    }
}
