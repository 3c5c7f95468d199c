use super::{check_dimensions, ModelError, Probabilistic};

/// k-nearest-neighbours classifier. Keeps the standardized training set
/// and reports the positive fraction among the k closest samples as the
/// probability estimate.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    k: usize,
    samples: Vec<Vec<f64>>,
    labels: Vec<bool>,
}

impl KNearestNeighbors {
    /// `k` is capped at the number of training samples.
    pub fn fit(rows: &[Vec<f64>], targets: &[bool], k: usize) -> Self {
        KNearestNeighbors {
            k: k.min(rows.len()).max(1),
            samples: rows.to_vec(),
            labels: targets.to_vec(),
        }
    }

    fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
    }
}

impl Probabilistic for KNearestNeighbors {
    fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        let n_features = self.samples.first().map_or(0, Vec::len);
        check_dimensions(n_features, features)?;

        let mut by_distance: Vec<(f64, bool)> = self
            .samples
            .iter()
            .zip(&self.labels)
            .map(|(sample, &label)| (Self::squared_distance(sample, features), label))
            .collect();
        // Ties broken by training order; distances are finite so the
        // comparison never sees a NaN from the training side.
        by_distance
            .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let positives = by_distance
            .iter()
            .take(self.k)
            .filter(|(_, label)| *label)
            .count();
        Ok(positives as f64 / self.k as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbour_vote_fraction_is_the_probability() {
        let rows = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![5.0, 5.0],
        ];
        let targets = vec![true, true, false, false];
        let model = KNearestNeighbors::fit(&rows, &targets, 3);

        let prob = model.positive_probability(&[0.05, 0.05]).unwrap();
        assert!((prob - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn k_is_capped_at_training_size() {
        let rows = vec![vec![0.0], vec![1.0]];
        let targets = vec![true, false];
        let model = KNearestNeighbors::fit(&rows, &targets, 23);
        assert_eq!(model.positive_probability(&[0.5]).unwrap(), 0.5);
    }
}
