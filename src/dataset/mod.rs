pub mod loader;

pub use loader::*;

/// A training matrix plus its binary target column, as loaded from a CSV.
/// Row order is load order; column order is the CSV header order and must
/// match the request field order of the owning domain.
#[derive(Debug, Clone)]
pub struct TrainingData {
    pub feature_names: Vec<String>,
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<bool>,
}

impl TrainingData {
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn n_rows(&self) -> usize {
        self.features.len()
    }

    /// Per-column arithmetic mean of the raw (unscaled) features. This is
    /// the imputation fallback for the lenient heart-disease domain.
    pub fn column_means(&self) -> Vec<f64> {
        let n = self.features.len() as f64;
        let mut means = vec![0.0; self.n_features()];
        for row in &self.features {
            for (acc, value) in means.iter_mut().zip(row) {
                *acc += value;
            }
        }
        for acc in &mut means {
            *acc /= n;
        }
        means
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_means_average_each_column() {
        let data = TrainingData {
            feature_names: vec!["a".to_string(), "b".to_string()],
            features: vec![vec![1.0, 10.0], vec![3.0, 30.0]],
            targets: vec![false, true],
        };
        assert_eq!(data.column_means(), vec![2.0, 20.0]);
    }
}
