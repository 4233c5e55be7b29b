//! Additive ensemble of regression trees.
//!
//! Trees are stored as flat node arrays with the root at index 0. A split
//! sends a sample left when its feature value is below the threshold; NaN
//! follows the split's default direction.

use serde::Deserialize;
use wagecast_core::Predictor;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default)]
        default_left: bool,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    fn check_shape(&self, index: usize, n_features: usize) -> anyhow::Result<()> {
        anyhow::ensure!(!self.nodes.is_empty(), "tree {index} has no nodes");
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *node
            {
                anyhow::ensure!(
                    feature < n_features,
                    "tree {index} node {i} splits on feature {feature}, schema has {n_features}"
                );
                // Children must come after their parent so evaluation always terminates.
                anyhow::ensure!(
                    left > i && right > i && left < self.nodes.len() && right < self.nodes.len(),
                    "tree {index} node {i} has out-of-range children ({left}, {right})"
                );
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &[f64]) -> anyhow::Result<f64> {
        let mut idx = 0;
        loop {
            let node = self
                .nodes
                .get(idx)
                .ok_or_else(|| anyhow::anyhow!("node index {idx} out of range"))?;
            match *node {
                TreeNode::Leaf(value) => return Ok(value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = *features
                        .get(feature)
                        .ok_or_else(|| anyhow::anyhow!("feature index {feature} out of range"))?;
                    let go_left = if x.is_nan() { default_left } else { x < threshold };
                    let next = if go_left { left } else { right };
                    anyhow::ensure!(next > idx, "node {idx} points back to node {next}");
                    idx = next;
                }
            }
        }
    }
}

/// `base_score + Σ tree outputs`.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn check_shape(&self, n_features: usize) -> anyhow::Result<()> {
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check_shape(i, n_features)?;
        }
        Ok(())
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, features: &[f64]) -> anyhow::Result<f64> {
        let mut total = self.base_score;
        for tree in &self.trees {
            total += tree.evaluate(features)?;
        }
        Ok(total)
    }
}
