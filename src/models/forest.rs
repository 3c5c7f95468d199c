use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::tree::{DecisionTree, TreeParams};
use super::{check_dimensions, ModelError, Probabilistic};

/// Bootstrap-aggregated decision trees with per-split feature
/// subsampling. The probability estimate is the mean of the tree leaf
/// fractions, mirroring how the reference forest averages votes.
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    /// Seed for bootstrap and feature sampling, fixed so the fitted
    /// forest is reproducible across restarts (the reference ensembles
    /// pin their random state the same way).
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        ForestParams {
            n_trees: 100,
            max_depth: 16,
            seed: 42,
        }
    }
}

impl RandomForest {
    pub fn fit(rows: &[Vec<f64>], targets: &[bool], params: ForestParams) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let n = rows.len();
        let mut rng = StdRng::seed_from_u64(params.seed);

        let features_per_split = (n_features as f64).sqrt().round().max(1.0) as usize;
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: 2,
            features_per_split: Some(features_per_split),
        };

        let trees = (0..params.n_trees)
            .map(|_| {
                let mut sample_rows = Vec::with_capacity(n);
                let mut sample_targets = Vec::with_capacity(n);
                for _ in 0..n {
                    let i = rng.gen_range(0..n);
                    sample_rows.push(rows[i].clone());
                    sample_targets.push(targets[i]);
                }
                DecisionTree::fit_with_rng(&sample_rows, &sample_targets, tree_params, &mut rng)
            })
            .collect();

        RandomForest { trees, n_features }
    }
}

impl Probabilistic for RandomForest {
    fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_dimensions(self.n_features, features)?;
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.positive_probability(features)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<Vec<f64>>, Vec<bool>) {
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for i in 0..10 {
            let offset = i as f64 * 0.1;
            rows.push(vec![-2.0 - offset, -1.5 + offset]);
            targets.push(false);
            rows.push(vec![2.0 + offset, 1.5 - offset]);
            targets.push(true);
        }
        (rows, targets)
    }

    #[test]
    fn separates_two_clusters() {
        let (rows, targets) = separable();
        let forest = RandomForest::fit(
            &rows,
            &targets,
            ForestParams {
                n_trees: 25,
                ..ForestParams::default()
            },
        );

        assert!(forest.positive_probability(&[2.5, 1.0]).unwrap() > 0.8);
        assert!(forest.positive_probability(&[-2.5, -1.0]).unwrap() < 0.2);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let (rows, targets) = separable();
        let a = RandomForest::fit(&rows, &targets, ForestParams::default());
        let b = RandomForest::fit(&rows, &targets, ForestParams::default());
        let probe = vec![0.3, -0.7];
        assert_eq!(
            a.positive_probability(&probe).unwrap(),
            b.positive_probability(&probe).unwrap()
        );
    }
}
