//! Bernoulli naive Bayes over binarized features

use super::{check_binary_classes, check_width};
use crate::features::FeatureVector;
use candle_core::{Device, Tensor};
use serde::{Deserialize, Serialize};
use truthlens_core::{Error, Label, Result};

/// On-disk form of a fitted Bernoulli naive Bayes model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BernoulliNbArtifact {
    pub n_features: usize,
    pub classes: Vec<u8>,
    /// Log prior per class
    pub class_log_prior: Vec<f64>,
    /// `log P(x_j = 1 | c)`, one row per class
    pub feature_log_prob: Vec<Vec<f64>>,
    /// Threshold for binarizing features; `null` uses values as given
    #[serde(default = "default_binarize")]
    pub binarize: Option<f32>,
}

/// Loaded model with the joint log-likelihood precomputed as a linear map
#[derive(Debug, Clone)]
pub struct BernoulliNb {
    n_features: usize,
    binarize: Option<f32>,
    /// `log p - log(1 - p)`, shape `(n_features, 2)`
    weights: Tensor,
    /// `log prior + Σ log(1 - p)` per class
    bias: [f64; 2],
}

impl BernoulliNb {
    pub fn from_artifact(artifact: BernoulliNbArtifact) -> Result<Self> {
        check_binary_classes(&artifact.classes)?;
        if artifact.class_log_prior.len() != 2 || artifact.feature_log_prob.len() != 2 {
            return Err(Error::invalid_artifact(
                "bernoulli_nb expects a prior and a feature row for exactly two classes",
            ));
        }

        let n = artifact.n_features;
        let mut bias = [0.0f64; 2];
        let mut delta = vec![[0.0f64; 2]; n];
        for (class, row) in artifact.feature_log_prob.iter().enumerate() {
            if row.len() != n {
                return Err(Error::invalid_artifact(format!(
                    "bernoulli_nb class {} has {} feature weights, expected {}",
                    class,
                    row.len(),
                    n
                )));
            }
            let prior = artifact.class_log_prior[class];
            if !(prior.is_finite() && prior <= 0.0) {
                return Err(Error::invalid_artifact(format!(
                    "bernoulli_nb class {} log prior {} is not in (-inf, 0]",
                    class, prior
                )));
            }
            bias[class] = prior;
            for (j, &log_p) in row.iter().enumerate() {
                if !(log_p < 0.0) {
                    return Err(Error::invalid_artifact(format!(
                        "bernoulli_nb log probability {} is not in (-inf, 0)",
                        log_p
                    )));
                }
                // ln(1 - e^log_p); -inf when e^log_p rounds to 1
                let log_not_p = (-log_p.exp()).ln_1p();
                if !log_not_p.is_finite() || !log_p.is_finite() {
                    return Err(Error::invalid_artifact(format!(
                        "bernoulli_nb log probability {} for class {} feature {} is not representable",
                        log_p, class, j
                    )));
                }
                delta[j][class] = log_p - log_not_p;
                bias[class] += log_not_p;
            }
        }

        let flat: Vec<f32> = delta
            .iter()
            .flat_map(|pair| pair.iter().map(|v| *v as f32))
            .collect();
        let weights = Tensor::from_vec(flat, (n, 2), &Device::Cpu)?;

        Ok(Self {
            n_features: n,
            binarize: artifact.binarize,
            weights,
            bias,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    fn joint_log_likelihood(&self, features: &FeatureVector) -> Result<[f64; 2]> {
        check_width(self.n_features, features)?;

        let x = match self.binarize {
            Some(threshold) => {
                let binarized: Vec<f32> = features
                    .values()
                    .iter()
                    .map(|&v| if v > threshold { 1.0 } else { 0.0 })
                    .collect();
                Tensor::from_vec(binarized, (1, self.n_features), &Device::Cpu)?
            }
            None => features.tensor().clone(),
        };

        let jll = x.matmul(&self.weights)?.flatten_all()?.to_vec1::<f32>()?;
        match jll.as_slice() {
            [fake, real] => Ok([*fake as f64 + self.bias[0], *real as f64 + self.bias[1]]),
            other => Err(Error::invalid_artifact(format!(
                "bernoulli_nb produced {} class scores",
                other.len()
            ))),
        }
    }

    /// Log-odds of class 1 over class 0
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        let [fake, real] = self.joint_log_likelihood(features)?;
        Ok(real - fake)
    }

    /// Hard label; ties go to class 0
    pub fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let [fake, real] = self.joint_log_likelihood(features)?;
        Ok(if real > fake { Label::Real } else { Label::Fake })
    }
}

fn default_binarize() -> Option<f32> {
    Some(0.0)
}
