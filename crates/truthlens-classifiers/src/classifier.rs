//! Classifier trait

use crate::features::FeatureVector;
use truthlens_core::{ModelResult, ModelRole, Result};

/// A loaded model that can score one feature vector.
///
/// Implementations are read-only after loading and shared across threads.
pub trait Classifier: Send + Sync {
    /// Role tag of this classifier
    fn role(&self) -> ModelRole;

    /// Feature width the model was trained on
    fn n_features(&self) -> usize;

    /// Score one vector. Fails with `ShapeMismatch` when the width is wrong.
    fn score(&self, features: &FeatureVector) -> Result<ModelResult>;
}
