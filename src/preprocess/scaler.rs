/// Per-field standardization fitted once from the training matrix and
/// immutable afterwards. Transform is `(x - mean) / scale` with `scale`
/// the population standard deviation; a constant column gets scale 1.0
/// so it passes through centered instead of dividing by zero.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let n = rows.len() as f64;

        let mut means = vec![0.0; n_features];
        for row in rows {
            for (acc, value) in means.iter_mut().zip(row) {
                *acc += value;
            }
        }
        for acc in &mut means {
            *acc /= n;
        }

        let mut scales = vec![0.0; n_features];
        for row in rows {
            for ((acc, value), mean) in scales.iter_mut().zip(row).zip(&means) {
                *acc += (value - mean).powi(2);
            }
        }
        for acc in &mut scales {
            let std = (*acc / n).sqrt();
            *acc = if std > 0.0 { std } else { 1.0 };
        }

        StandardScaler { means, scales }
    }

    /// Rebuild a fitted scaler from persisted parameters.
    pub fn from_parameters(means: Vec<f64>, scales: Vec<f64>) -> Self {
        StandardScaler { means, scales }
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    pub fn transform(&self, raw: &[f64]) -> Vec<f64> {
        raw.iter()
            .zip(&self.means)
            .zip(&self.scales)
            .map(|((x, mean), scale)| (x - mean) / scale)
            .collect()
    }

    pub fn inverse_transform(&self, standardized: &[f64]) -> Vec<f64> {
        standardized
            .iter()
            .zip(&self.means)
            .zip(&self.scales)
            .map(|((z, mean), scale)| z * scale + mean)
            .collect()
    }

    /// Transform every row of a training matrix; used once at fit time.
    pub fn transform_matrix(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}
