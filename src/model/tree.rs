//! Binary classification decision tree (CART with Gini impurity).

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Decision tree configuration.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Maximum depth of the tree.
    pub max_depth: usize,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
    /// Minimum samples in a leaf node.
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all).
    pub max_features: Option<usize>,
    /// Random seed for feature subsampling.
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

/// Tree node. Internal nodes hold a split; every node carries the class
/// distribution of the samples that reached it.
#[derive(Debug, Clone)]
struct TreeNode {
    feature_idx: Option<usize>,
    threshold: Option<f64>,
    /// P(class 0), P(class 1) among samples at this node.
    class_probs: [f64; 2],
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(class_probs: [f64; 2]) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            class_probs,
            left: None,
            right: None,
        }
    }

}

/// Binary Gini impurity.
fn gini(labels: &[u8]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let n = labels.len() as f64;
    let p1 = labels.iter().filter(|&&l| l == 1).count() as f64 / n;
    let p0 = 1.0 - p1;
    1.0 - p0 * p0 - p1 * p1
}

fn class_probabilities(labels: &[u8]) -> [f64; 2] {
    if labels.is_empty() {
        return [0.5, 0.5];
    }
    let n = labels.len() as f64;
    let ones = labels.iter().filter(|&&l| l == 1).count() as f64;
    [(n - ones) / n, ones / n]
}

/// Decision tree classifier.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self { config, root: None }
    }

    /// Fit the tree on a feature matrix and binary labels.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) {
        debug_assert_eq!(x.len(), y.len());
        let indices: Vec<usize> = (0..x.len()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.root = Some(self.build_node(x, y, &indices, 0, &mut rng));
    }

    fn build_node(
        &self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let labels: Vec<u8> = indices.iter().map(|&i| y[i]).collect();
        let impurity = gini(&labels);

        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || impurity < 1e-10
        {
            return TreeNode::leaf(class_probabilities(&labels));
        }

        match self.find_best_split(x, y, indices, impurity, rng) {
            Some((feature_idx, threshold, left_idx, right_idx)) => {
                if left_idx.len() < self.config.min_samples_leaf
                    || right_idx.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(class_probabilities(&labels));
                }
                let left = self.build_node(x, y, &left_idx, depth + 1, rng);
                let right = self.build_node(x, y, &right_idx, depth + 1, rng);
                TreeNode {
                    feature_idx: Some(feature_idx),
                    threshold: Some(threshold),
                    class_probs: class_probabilities(&labels),
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => TreeNode::leaf(class_probabilities(&labels)),
        }
    }

    /// Scan a random feature subset for the split with the best Gini
    /// gain, trying midpoints between consecutive unique values.
    fn find_best_split(
        &self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let n_features = x.first()?.len();
        let max_features = self.config.max_features.unwrap_or(n_features).min(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let mut best_gain = 0.0;
        let mut best: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices.iter().map(|&i| x[i][feature_idx]).collect();
            values.sort_by(f64::total_cmp);
            values.dedup();

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| x[i][feature_idx] <= threshold);

                if left_idx.is_empty() || right_idx.is_empty() {
                    continue;
                }

                let left_labels: Vec<u8> = left_idx.iter().map(|&i| y[i]).collect();
                let right_labels: Vec<u8> = right_idx.iter().map(|&i| y[i]).collect();

                let n_left = left_idx.len() as f64;
                let n_right = right_idx.len() as f64;
                let weighted = (n_left * gini(&left_labels) + n_right * gini(&right_labels))
                    / (n_left + n_right);
                let gain = parent_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some((feature_idx, threshold, left_idx, right_idx));
                }
            }
        }

        best
    }

    /// Class probabilities for a single sample.
    pub fn predict_proba_one(&self, features: &[f64]) -> [f64; 2] {
        let Some(mut node) = self.root.as_ref() else {
            return [0.5, 0.5];
        };
        loop {
            match (node.feature_idx, node.threshold, &node.left, &node.right) {
                (Some(feature_idx), Some(threshold), Some(left), Some(right)) => {
                    node = if features[feature_idx] <= threshold {
                        left
                    } else {
                        right
                    };
                }
                _ => return node.class_probs,
            }
        }
    }
}
