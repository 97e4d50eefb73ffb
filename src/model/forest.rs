//! Seeded random forest classifier.
//!
//! Bootstrap-aggregated Gini trees with per-node feature subsampling.
//! All randomness flows from one base seed, so a fit on identical data
//! is bit-reproducible call to call.

use super::tree::{DecisionTree, TreeConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Random forest configuration.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Number of trees.
    pub n_trees: usize,
    /// Maximum depth of each tree.
    pub max_depth: usize,
    /// Minimum samples to split a node.
    pub min_samples_split: usize,
    /// Minimum samples in a leaf.
    pub min_samples_leaf: usize,
    /// Base random seed.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 50,
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

/// Random forest classifier.
#[derive(Debug, Clone)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    /// Fit the forest on a feature matrix and binary labels.
    ///
    /// Each tree trains on a bootstrap resample drawn from a ChaCha8
    /// stream seeded with `seed + tree_index` and considers
    /// ceil(sqrt(n_features)) features per split.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) {
        debug_assert_eq!(x.len(), y.len());
        let n_samples = x.len();
        let n_features = x.first().map_or(0, |r| r.len());
        let max_features = (n_features as f64).sqrt().ceil() as usize;

        self.trees = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_seed = self.config.seed.wrapping_add(i as u64);
                let mut rng = ChaCha8Rng::seed_from_u64(tree_seed);
                let mut bx = Vec::with_capacity(n_samples);
                let mut by = Vec::with_capacity(n_samples);
                for _ in 0..n_samples {
                    let idx = rng.gen_range(0..n_samples);
                    bx.push(x[idx].clone());
                    by.push(y[idx]);
                }

                let mut tree = DecisionTree::new(TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features.max(1)),
                    seed: tree_seed,
                });
                tree.fit(&bx, &by);
                tree
            })
            .collect();
    }

    /// Averaged class probabilities for one sample.
    pub fn predict_proba_one(&self, features: &[f64]) -> [f64; 2] {
        if self.trees.is_empty() {
            return [0.5, 0.5];
        }
        let mut probs = [0.0; 2];
        for tree in &self.trees {
            let p = tree.predict_proba_one(features);
            probs[0] += p[0];
            probs[1] += p[1];
        }
        let n = self.trees.len() as f64;
        [probs[0] / n, probs[1] / n]
    }

    /// Predicted class and its probability. Exact ties resolve to
    /// class 0.
    pub fn predict_one(&self, features: &[f64]) -> (u8, f64) {
        let probs = self.predict_proba_one(features);
        if probs[1] > probs[0] {
            (1, probs[1])
        } else {
            (0, probs[0])
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_step(n: usize) -> (Vec<Vec<f64>>, Vec<u8>) {
        // Two informative features, one pure noise column.
        let x: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let v = i as f64 / n as f64;
                vec![v, 1.0 - v, ((i * 7919) % 97) as f64]
            })
            .collect();
        let y: Vec<u8> = (0..n).map(|i| u8::from(i >= n / 2)).collect();
        (x, y)
    }

    #[test]
    fn test_forest_separates_classes() {
        let (x, y) = noisy_step(120);
        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 20,
            ..Default::default()
        });
        forest.fit(&x, &y);

        assert_eq!(forest.n_trees(), 20);
        let (low_class, low_p) = forest.predict_one(&[0.05, 0.95, 40.0]);
        let (high_class, high_p) = forest.predict_one(&[0.95, 0.05, 40.0]);
        assert_eq!(low_class, 0);
        assert_eq!(high_class, 1);
        assert!(low_p > 0.6 && high_p > 0.6);
    }

    #[test]
    fn test_single_class_labels_fit_with_full_confidence() {
        let x: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64, (i * i) as f64]).collect();
        let y = vec![0u8; 30];
        let mut forest = RandomForest::new(ForestConfig::default());
        forest.fit(&x, &y);

        let (class, p) = forest.predict_one(&[12.0, 144.0]);
        assert_eq!(class, 0);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_fit_predict_is_reproducible() {
        let (x, y) = noisy_step(80);
        let mut a = RandomForest::new(ForestConfig::default());
        let mut b = RandomForest::new(ForestConfig::default());
        a.fit(&x, &y);
        b.fit(&x, &y);

        for probe in [[0.1, 0.9, 3.0], [0.6, 0.4, 88.0]] {
            assert_eq!(a.predict_proba_one(&probe), b.predict_proba_one(&probe));
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (x, y) = noisy_step(60);
        let mut forest = RandomForest::new(ForestConfig::default());
        forest.fit(&x, &y);
        let p = forest.predict_proba_one(&[0.5, 0.5, 10.0]);
        assert!((p[0] + p[1] - 1.0).abs() < 1e-9);
    }
}
