//! Random forest classifier built from bagged decision trees.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::training::features::TrainingSet;

/// Decision tree hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

/// Binary classification tree node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature_idx: Option<usize>,
    pub threshold: Option<f64>,
    /// Probability of the positive class at this node.
    pub positive_prob: f64,
    pub n_samples: usize,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(positive_prob: f64, n_samples: usize) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            positive_prob,
            n_samples,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Single CART-style classification tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
    feature_importances: Vec<f64>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            feature_importances: Vec::new(),
        }
    }

    pub fn fit(&mut self, set: &TrainingSet) {
        let n_features = set.n_features();
        self.feature_importances = vec![0.0; n_features];

        let indices: Vec<usize> = (0..set.n_samples()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        self.root = Some(self.build_tree(set, &indices, 0, &mut rng));

        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }
    }

    fn build_tree(
        &mut self,
        set: &TrainingSet,
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n = indices.len();
        let labels: Vec<f64> = indices.iter().map(|&i| set.labels[i]).collect();
        let impurity = gini(&labels);

        if depth >= self.config.max_depth
            || n < self.config.min_samples_split
            || impurity < 1e-10
        {
            return TreeNode::leaf(positive_ratio(&labels), n);
        }

        match self.find_best_split(set, indices, rng) {
            Some((feature_idx, threshold, left_indices, right_indices, importance)) => {
                if left_indices.len() < self.config.min_samples_leaf
                    || right_indices.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(positive_ratio(&labels), n);
                }

                self.feature_importances[feature_idx] += importance;

                let left = self.build_tree(set, &left_indices, depth + 1, rng);
                let right = self.build_tree(set, &right_indices, depth + 1, rng);

                TreeNode {
                    feature_idx: Some(feature_idx),
                    threshold: Some(threshold),
                    positive_prob: positive_ratio(&labels),
                    n_samples: n,
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => TreeNode::leaf(positive_ratio(&labels), n),
        }
    }

    fn find_best_split(
        &self,
        set: &TrainingSet,
        indices: &[usize],
        rng: &mut ChaCha8Rng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>, f64)> {
        let n_features = set.n_features();
        let max_features = self.config.max_features.unwrap_or(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let labels: Vec<f64> = indices.iter().map(|&i| set.labels[i]).collect();
        let parent_impurity = gini(&labels);

        let mut best_gain = 0.0;
        let mut best_split: Option<(usize, f64, Vec<usize>, Vec<usize>, f64)> = None;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| set.features[i][feature_idx])
                .collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| set.features[i][feature_idx] <= threshold);

                if left_idx.is_empty() || right_idx.is_empty() {
                    continue;
                }

                let left_labels: Vec<f64> = left_idx.iter().map(|&i| set.labels[i]).collect();
                let right_labels: Vec<f64> = right_idx.iter().map(|&i| set.labels[i]).collect();

                let n_left = left_idx.len() as f64;
                let n_right = right_idx.len() as f64;
                let weighted_impurity =
                    (n_left * gini(&left_labels) + n_right * gini(&right_labels))
                        / (n_left + n_right);
                let gain = parent_impurity - weighted_impurity;

                if gain > best_gain {
                    best_gain = gain;
                    let importance = gain * indices.len() as f64;
                    best_split = Some((feature_idx, threshold, left_idx, right_idx, importance));
                }
            }
        }

        best_split
    }

    /// Probability of the positive class for one sample.
    pub fn predict_proba_one(&self, features: &[f64]) -> f64 {
        match &self.root {
            Some(root) => {
                let mut node = root;
                loop {
                    match (node.feature_idx, node.threshold) {
                        (Some(idx), Some(threshold)) if !node.is_leaf() => {
                            let child = if features[idx] <= threshold {
                                node.left.as_deref()
                            } else {
                                node.right.as_deref()
                            };
                            match child {
                                Some(next) => node = next,
                                None => return node.positive_prob,
                            }
                        }
                        _ => return node.positive_prob,
                    }
                }
            }
            None => 0.5,
        }
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

/// Gini impurity for binary labels.
fn gini(labels: &[f64]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let p = positive_ratio(labels);
    2.0 * p * (1.0 - p)
}

fn positive_ratio(labels: &[f64]) -> f64 {
    if labels.is_empty() {
        return 0.5;
    }
    labels.iter().filter(|&&l| l > 0.5).count() as f64 / labels.len() as f64
}

/// Random forest hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features per split (sqrt of total if None)
    pub max_features: Option<usize>,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 200,
            max_depth: 16,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Random forest binary classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_names: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    /// Trains all trees in parallel on bootstrap samples.
    pub fn fit(&mut self, set: &TrainingSet) {
        self.feature_names = set.feature_names.clone();
        let n_features = set.n_features();

        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize);

        let config = self.config.clone();
        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_config = TreeConfig {
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split,
                    min_samples_leaf: config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: config.seed.wrapping_add(i as u64),
                };

                let mut tree = DecisionTree::new(tree_config);
                if config.bootstrap {
                    let sample = set.bootstrap_sample(config.seed.wrapping_add(i as u64));
                    tree.fit(&sample);
                } else {
                    tree.fit(set);
                }
                tree
            })
            .collect();

        self.trees = trees;

        self.feature_importances = vec![0.0; n_features];
        for tree in &self.trees {
            for (i, &imp) in tree.feature_importances().iter().enumerate() {
                self.feature_importances[i] += imp;
            }
        }
        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }
    }

    /// Mean positive-class probability across trees.
    pub fn predict_proba_one(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.5;
        }
        self.trees
            .iter()
            .map(|t| t.predict_proba_one(features))
            .sum::<f64>()
            / self.trees.len() as f64
    }

    /// Class label at the 0.5 threshold.
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        if self.predict_proba_one(features) > 0.5 {
            1.0
        } else {
            0.0
        }
    }

    pub fn predict(&self, set: &TrainingSet) -> Vec<f64> {
        set.features
            .par_iter()
            .map(|f| self.predict_one(f))
            .collect()
    }

    pub fn predict_proba(&self, set: &TrainingSet) -> Vec<f64> {
        set.features
            .par_iter()
            .map(|f| self.predict_proba_one(f))
            .collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Feature names paired with importances, highest first.
    pub fn feature_importance_ranking(&self) -> Vec<(String, f64)> {
        let mut ranking: Vec<(String, f64)> = self
            .feature_names
            .iter()
            .cloned()
            .zip(self.feature_importances.iter().copied())
            .collect();
        ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranking
    }
}
