//! Decision tree classifier stored as flat node arrays

use super::{check_binary_classes, check_width};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use truthlens_core::{Error, Label, Result};

/// Flat node arrays of one fitted tree.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise samples with
/// `x[feature[i]] <= threshold[i]` go left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNodes {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f32>,
    /// Class weights per node, `[fake, real]`
    pub value: Vec<[f64; 2]>,
}

impl TreeNodes {
    /// Check array lengths, child links and split features
    pub fn validate(&self, n_features: usize) -> Result<()> {
        let n_nodes = self.children_left.len();
        if n_nodes == 0 {
            return Err(Error::invalid_artifact("tree has no nodes"));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|len| *len != n_nodes)
        {
            return Err(Error::invalid_artifact(format!(
                "tree node arrays disagree on length ({} nodes)",
                n_nodes
            )));
        }

        for node in 0..n_nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left < 0 {
                continue;
            }
            // children always come after their parent, which also rules out cycles
            let in_range = |child: i64| child > node as i64 && (child as usize) < n_nodes;
            if !in_range(left) || !in_range(right) {
                return Err(Error::invalid_artifact(format!(
                    "tree node {} has invalid children ({}, {})",
                    node, left, right
                )));
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(Error::invalid_artifact(format!(
                    "tree node {} splits on feature {} outside {} features",
                    node, feature, n_features
                )));
            }
        }
        Ok(())
    }

    /// Class weights of the leaf reached by `values`
    pub fn leaf_value(&self, values: &[f32]) -> [f64; 2] {
        let mut node = 0usize;
        while self.children_left[node] >= 0 {
            let feature = self.feature[node] as usize;
            node = if values[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }

    /// Leaf class weights normalised to probabilities
    pub fn leaf_proba(&self, values: &[f32]) -> [f64; 2] {
        let [fake, real] = self.leaf_value(values);
        let total = fake + real;
        if total > 0.0 {
            [fake / total, real / total]
        } else {
            [0.5, 0.5]
        }
    }
}

/// On-disk form of a fitted decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeArtifact {
    pub n_features: usize,
    pub classes: Vec<u8>,
    #[serde(flatten)]
    pub tree: TreeNodes,
}

/// Hard-label-only tree classifier
#[derive(Debug, Clone)]
pub struct DecisionTree {
    n_features: usize,
    tree: TreeNodes,
}

impl DecisionTree {
    pub fn from_artifact(artifact: DecisionTreeArtifact) -> Result<Self> {
        check_binary_classes(&artifact.classes)?;
        artifact.tree.validate(artifact.n_features)?;
        Ok(Self {
            n_features: artifact.n_features,
            tree: artifact.tree,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Argmax of the leaf weights; ties go to class 0
    pub fn predict(&self, features: &FeatureVector) -> Result<Label> {
        check_width(self.n_features, features)?;
        let [fake, real] = self.tree.leaf_value(features.values());
        Ok(if real > fake { Label::Real } else { Label::Fake })
    }
}
