//! Random forest: mean of per-tree leaf probabilities

use super::decision_tree::TreeNodes;
use super::{check_binary_classes, check_width};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use truthlens_core::{Error, Label, Result};

/// On-disk form of a fitted forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestArtifact {
    pub n_features: usize,
    pub classes: Vec<u8>,
    pub estimators: Vec<TreeNodes>,
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    n_features: usize,
    estimators: Vec<TreeNodes>,
}

impl RandomForest {
    pub fn from_artifact(artifact: RandomForestArtifact) -> Result<Self> {
        check_binary_classes(&artifact.classes)?;
        if artifact.estimators.is_empty() {
            return Err(Error::invalid_artifact("random_forest has no estimators"));
        }
        for (i, tree) in artifact.estimators.iter().enumerate() {
            tree.validate(artifact.n_features).map_err(|e| {
                Error::invalid_artifact(format!("random_forest estimator {}: {}", i, e))
            })?;
        }

        Ok(Self {
            n_features: artifact.n_features,
            estimators: artifact.estimators,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// `[P(class 0), P(class 1)]` averaged over all trees
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2]> {
        check_width(self.n_features, features)?;

        let values = features.values();
        let mut total = [0.0f64; 2];
        for tree in &self.estimators {
            let [fake, real] = tree.leaf_proba(values);
            total[0] += fake;
            total[1] += real;
        }

        let n = self.estimators.len() as f64;
        Ok([total[0] / n, total[1] / n])
    }

    /// Argmax of the averaged probabilities; ties go to class 0
    pub fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let [fake, real] = self.predict_proba(features)?;
        Ok(if real > fake { Label::Real } else { Label::Fake })
    }
}
