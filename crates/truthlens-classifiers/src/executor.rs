//! Runs every present classifier against one feature vector

use crate::classifier::Classifier;
use crate::features::FeatureVector;
use tracing::{debug, warn};
use truthlens_core::{Error, ModelResult, Result};

/// Score `features` with each classifier in turn.
///
/// A failing classifier, or one reporting a non-finite probability, is
/// logged and left out. Fails with [`Error::NoPredictions`] only when
/// nothing succeeded.
pub fn run_all(classifiers: &[&dyn Classifier], features: &FeatureVector) -> Result<Vec<ModelResult>> {
    let mut results = Vec::with_capacity(classifiers.len());

    for classifier in classifiers {
        let role = classifier.role();
        match classifier.score(features) {
            Ok(result) if result.probability.is_some_and(|p| !p.is_finite()) => {
                metrics::counter!("truthlens_model_failures_total", "role" => role.as_str())
                    .increment(1);
                warn!(
                    "Model {} produced a non-finite probability {:?}",
                    role, result.probability
                );
            }
            Ok(result) => {
                metrics::counter!("truthlens_model_invocations_total", "role" => role.as_str())
                    .increment(1);
                debug!(
                    role = %role,
                    label = %result.prediction,
                    probability = ?result.probability,
                    "Model scored input"
                );
                results.push(result);
            }
            Err(e) => {
                metrics::counter!("truthlens_model_failures_total", "role" => role.as_str())
                    .increment(1);
                warn!("Model {} failed to score input: {}", role, e);
            }
        }
    }

    if results.is_empty() {
        return Err(Error::NoPredictions);
    }
    Ok(results)
}
