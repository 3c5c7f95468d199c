use rand::seq::SliceRandom;
use rand::Rng;

use super::{check_dimensions, ModelError, Probabilistic};

/// CART decision tree with Gini impurity splits. Leaves report the
/// positive fraction of the training samples they hold, which doubles as
/// the probability estimate.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
    n_features: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        positive_fraction: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Number of candidate features per split; `None` considers all.
    /// The random forest passes sqrt(n_features).
    pub features_per_split: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        TreeParams {
            max_depth: 16,
            min_samples_split: 2,
            features_per_split: None,
        }
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

impl DecisionTree {
    pub fn fit(rows: &[Vec<f64>], targets: &[bool], params: TreeParams) -> Self {
        let mut rng = rand::thread_rng();
        Self::fit_with_rng(rows, targets, params, &mut rng)
    }

    /// Forest trees share a seeded RNG so fits are reproducible.
    pub fn fit_with_rng<R: Rng>(
        rows: &[Vec<f64>],
        targets: &[bool],
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let indices: Vec<usize> = (0..rows.len()).collect();
        let root = Self::grow(rows, targets, &indices, n_features, params, 0, rng);
        DecisionTree { root, n_features }
    }

    fn grow<R: Rng>(
        rows: &[Vec<f64>],
        targets: &[bool],
        indices: &[usize],
        n_features: usize,
        params: TreeParams,
        depth: usize,
        rng: &mut R,
    ) -> Node {
        let positives = indices.iter().filter(|&&i| targets[i]).count();
        let leaf = Node::Leaf {
            positive_fraction: if indices.is_empty() {
                0.0
            } else {
                positives as f64 / indices.len() as f64
            },
        };

        let pure = positives == 0 || positives == indices.len();
        if pure || depth >= params.max_depth || indices.len() < params.min_samples_split {
            return leaf;
        }

        let candidate_features: Vec<usize> = match params.features_per_split {
            Some(m) if m < n_features => {
                let mut all: Vec<usize> = (0..n_features).collect();
                all.shuffle(rng);
                all.truncate(m.max(1));
                all
            }
            _ => (0..n_features).collect(),
        };

        let best = candidate_features
            .iter()
            .filter_map(|&feature| Self::best_split_on(rows, targets, indices, feature))
            .min_by(|a, b| {
                a.impurity
                    .partial_cmp(&b.impurity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(split) = best else {
            return leaf;
        };

        let parent_impurity = gini(positives, indices.len());
        if split.impurity >= parent_impurity {
            return leaf;
        }

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| rows[i][split.feature] <= split.threshold);
        if left.is_empty() || right.is_empty() {
            return leaf;
        }

        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(Self::grow(
                rows, targets, &left, n_features, params, depth + 1, rng,
            )),
            right: Box::new(Self::grow(
                rows, targets, &right, n_features, params, depth + 1, rng,
            )),
        }
    }

    /// Best threshold for one feature: sort the subset by the feature and
    /// sweep prefix counts, so each candidate midpoint is evaluated in
    /// O(1) after the sort.
    fn best_split_on(
        rows: &[Vec<f64>],
        targets: &[bool],
        indices: &[usize],
        feature: usize,
    ) -> Option<SplitCandidate> {
        let mut ordered: Vec<(f64, bool)> = indices
            .iter()
            .map(|&i| (rows[i][feature], targets[i]))
            .collect();
        ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let total = ordered.len();
        let total_pos = ordered.iter().filter(|(_, t)| *t).count();

        let mut best: Option<SplitCandidate> = None;
        let mut left_pos = 0usize;
        for i in 0..total - 1 {
            if ordered[i].1 {
                left_pos += 1;
            }
            // No valid threshold between equal values.
            if ordered[i].0 == ordered[i + 1].0 {
                continue;
            }
            let left_n = i + 1;
            let right_n = total - left_n;
            let weighted = (left_n as f64 * gini(left_pos, left_n)
                + right_n as f64 * gini(total_pos - left_pos, right_n))
                / total as f64;
            if best.as_ref().map_or(true, |b| weighted < b.impurity) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (ordered[i].0 + ordered[i + 1].0) / 2.0,
                    impurity: weighted,
                });
            }
        }
        best
    }

    fn leaf_fraction(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { positive_fraction } => return *positive_fraction,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }
}

impl Probabilistic for DecisionTree {
    fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_dimensions(self.n_features, features)?;
        Ok(self.leaf_fraction(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learns_an_axis_aligned_boundary() {
        let rows = vec![
            vec![1.0, 5.0],
            vec![2.0, -3.0],
            vec![3.0, 8.0],
            vec![7.0, 5.0],
            vec![8.0, -3.0],
            vec![9.0, 8.0],
        ];
        let targets = vec![false, false, false, true, true, true];
        let tree = DecisionTree::fit(&rows, &targets, TreeParams::default());

        assert_eq!(tree.positive_probability(&[2.0, 0.0]).unwrap(), 0.0);
        assert_eq!(tree.positive_probability(&[8.0, 0.0]).unwrap(), 1.0);
    }

    #[test]
    fn uniform_labels_give_a_constant_leaf() {
        let rows = vec![vec![1.0], vec![2.0], vec![3.0]];
        let targets = vec![true, true, true];
        let tree = DecisionTree::fit(&rows, &targets, TreeParams::default());
        assert_eq!(tree.positive_probability(&[10.0]).unwrap(), 1.0);
    }
}
