//! Classical model artifacts and their scoring adapters
//!
//! Every role has a different native API (log-odds, margin, hard label,
//! class probabilities). [`LoadedClassifier`] closes over the four of them
//! and adapts each to a uniform [`ModelResult`].

pub mod bernoulli_nb;
pub mod decision_tree;
pub mod pca_linear;
pub mod random_forest;

pub use bernoulli_nb::{BernoulliNb, BernoulliNbArtifact};
pub use decision_tree::{DecisionTree, DecisionTreeArtifact, TreeNodes};
pub use pca_linear::{PcaLinear, PcaLinearArtifact};
pub use random_forest::{RandomForest, RandomForestArtifact};

use crate::classifier::Classifier;
use crate::features::FeatureVector;
use crate::model_loader::load_artifact;
use std::path::Path;
use truthlens_core::{Error, ModelResult, ModelRole, Result};

/// Map an unbounded decision score into `(0, 1)`
pub fn logistic(score: f64) -> f64 {
    1.0 / (1.0 + (-score).exp())
}

pub(crate) fn check_binary_classes(classes: &[u8]) -> Result<()> {
    if classes != [0, 1] {
        return Err(Error::invalid_artifact(format!(
            "expected classes [0, 1], found {:?}",
            classes
        )));
    }
    Ok(())
}

pub(crate) fn check_width(n_features: usize, features: &FeatureVector) -> Result<()> {
    if features.len() != n_features {
        return Err(Error::ShapeMismatch {
            expected: n_features,
            actual: features.len(),
        });
    }
    Ok(())
}

/// One loaded classifier, tagged by role
#[derive(Debug, Clone)]
pub enum LoadedClassifier {
    BernoulliNb(BernoulliNb),
    DecisionTree(DecisionTree),
    PcaBased(PcaLinear),
    RandomForest(RandomForest),
}

impl LoadedClassifier {
    /// Read and validate the artifact for `role` at `path`.
    ///
    /// Every failure is reported as [`Error::ArtifactLoad`] so the registry
    /// can treat it as a missing slot.
    pub fn load(role: ModelRole, path: &Path) -> Result<Self> {
        Self::load_inner(role, path).map_err(|e| match e {
            Error::ArtifactLoad { .. } => e,
            other => Error::artifact_load(role, format!("{}: {}", path.display(), other)),
        })
    }

    fn load_inner(role: ModelRole, path: &Path) -> Result<Self> {
        Ok(match role {
            ModelRole::BernoulliNb => {
                Self::BernoulliNb(BernoulliNb::from_artifact(load_artifact(path)?)?)
            }
            ModelRole::DecisionTree => {
                Self::DecisionTree(DecisionTree::from_artifact(load_artifact(path)?)?)
            }
            ModelRole::PcaBased => Self::PcaBased(PcaLinear::from_artifact(load_artifact(path)?)?),
            ModelRole::RandomForest => {
                Self::RandomForest(RandomForest::from_artifact(load_artifact(path)?)?)
            }
        })
    }
}

impl Classifier for LoadedClassifier {
    fn role(&self) -> ModelRole {
        match self {
            Self::BernoulliNb(_) => ModelRole::BernoulliNb,
            Self::DecisionTree(_) => ModelRole::DecisionTree,
            Self::PcaBased(_) => ModelRole::PcaBased,
            Self::RandomForest(_) => ModelRole::RandomForest,
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Self::BernoulliNb(m) => m.n_features(),
            Self::DecisionTree(m) => m.n_features(),
            Self::PcaBased(m) => m.n_features(),
            Self::RandomForest(m) => m.n_features(),
        }
    }

    fn score(&self, features: &FeatureVector) -> Result<ModelResult> {
        let role = self.role();
        match self {
            Self::BernoulliNb(model) => {
                let probability = logistic(model.decision_function(features)?);
                let label = model.predict(features)?;
                Ok(ModelResult::with_probability(role, label, probability))
            }
            Self::PcaBased(model) => {
                let probability = logistic(model.decision_function(features)?);
                let label = model.predict(features)?;
                Ok(ModelResult::with_probability(role, label, probability))
            }
            Self::DecisionTree(model) => {
                Ok(ModelResult::label_only(role, model.predict(features)?))
            }
            Self::RandomForest(model) => {
                let [_, real] = model.predict_proba(features)?;
                let label = model.predict(features)?;
                Ok(ModelResult::with_probability(role, label, real))
            }
        }
    }
}
