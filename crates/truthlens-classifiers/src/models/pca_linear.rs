//! Linear classifier on a PCA projection of the features

use super::{check_binary_classes, check_width};
use crate::features::FeatureVector;
use candle_core::{Device, Tensor};
use serde::{Deserialize, Serialize};
use truthlens_core::{Error, Label, Result};

/// On-disk form of the fitted projection plus linear head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaLinearArtifact {
    pub n_features: usize,
    pub classes: Vec<u8>,
    /// Per-feature mean subtracted before projecting
    pub mean: Vec<f32>,
    /// Principal axes, one row per component
    pub components: Vec<Vec<f32>>,
    /// Linear head weights, one per component
    pub coef: Vec<f32>,
    pub intercept: f32,
}

#[derive(Debug, Clone)]
pub struct PcaLinear {
    n_features: usize,
    /// Shape `(1, n_features)`
    mean: Tensor,
    /// Transposed components, shape `(n_features, n_components)`
    projection: Tensor,
    /// Shape `(n_components, 1)`
    coef: Tensor,
    intercept: f32,
}

impl PcaLinear {
    pub fn from_artifact(artifact: PcaLinearArtifact) -> Result<Self> {
        check_binary_classes(&artifact.classes)?;
        let n = artifact.n_features;
        let k = artifact.components.len();

        if k == 0 {
            return Err(Error::invalid_artifact("pca_based has no components"));
        }
        if artifact.mean.len() != n {
            return Err(Error::invalid_artifact(format!(
                "pca_based mean has {} entries, expected {}",
                artifact.mean.len(),
                n
            )));
        }
        if let Some(row) = artifact.components.iter().position(|c| c.len() != n) {
            return Err(Error::invalid_artifact(format!(
                "pca_based component {} has {} entries, expected {}",
                row,
                artifact.components[row].len(),
                n
            )));
        }
        if artifact.coef.len() != k {
            return Err(Error::invalid_artifact(format!(
                "pca_based head has {} weights for {} components",
                artifact.coef.len(),
                k
            )));
        }

        let device = Device::Cpu;
        let flat: Vec<f32> = artifact.components.into_iter().flatten().collect();
        let projection = Tensor::from_vec(flat, (k, n), &device)?.t()?.contiguous()?;
        let mean = Tensor::from_vec(artifact.mean, (1, n), &device)?;
        let coef = Tensor::from_vec(artifact.coef, (k, 1), &device)?;

        Ok(Self {
            n_features: n,
            mean,
            projection,
            coef,
            intercept: artifact.intercept,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Signed distance from the decision boundary in projected space
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        check_width(self.n_features, features)?;

        let projected = features
            .tensor()
            .broadcast_sub(&self.mean)?
            .matmul(&self.projection)?;
        let score = projected.matmul(&self.coef)?.flatten_all()?.to_vec1::<f32>()?;

        score
            .first()
            .map(|s| (*s + self.intercept) as f64)
            .ok_or_else(|| Error::invalid_artifact("pca_based produced no score"))
    }

    /// Class 1 iff the decision score is strictly positive
    pub fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let score = self.decision_function(features)?;
        Ok(if score > 0.0 { Label::Real } else { Label::Fake })
    }
}
