//! End-to-end prediction: text in, `[ordinal, confidence]` out

use crate::aggregator::aggregate;
use crate::config::ClassifierConfig;
use crate::executor::run_all;
use crate::registry::{ModelRegistry, SharedRegistry};
use crate::scale::to_ordinal;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use truthlens_core::{
    EnsembleOutcome, Error, Label, ModelResult, ModelRole, OrdinalScore, Result, Verdict,
};

/// Full record of one successful prediction
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub outcome: EnsembleOutcome,
    pub score: OrdinalScore,
    /// Per-model results that went into the vote
    pub results: Vec<ModelResult>,
    /// Roles with no loaded model
    pub missing_roles: Vec<ModelRole>,
    pub latency_us: u64,
}

impl Prediction {
    pub fn verdict(&self) -> Verdict {
        self.score.verdict()
    }
}

/// Normalize, vectorize, score, aggregate and map one text
#[derive(Clone)]
pub struct EnsemblePipeline {
    registry: Arc<ModelRegistry>,
}

impl EnsemblePipeline {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn from_config(config: ClassifierConfig) -> Self {
        Self::new(ModelRegistry::new(config))
    }

    pub fn from_shared(shared: &SharedRegistry) -> Self {
        Self {
            registry: shared.clone_arc(),
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Run the whole chain, surfacing every fatal error.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let start = Instant::now();
        let models = self.registry.ensure_loaded()?;

        let features = models.features().normalize_and_vectorize(text)?;
        debug!(
            "Vectorized input into {} features ({} non-zero)",
            features.len(),
            features.nnz()
        );

        let results = run_all(&models.classifiers(), &features)?;
        let outcome = aggregate(&results)?;
        let score = to_ordinal(&outcome);

        Ok(Prediction {
            outcome,
            score,
            results,
            missing_roles: models.missing_roles(),
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    /// Like [`predict`](Self::predict), but every failure maps to
    /// [`Verdict::NEUTRAL`].
    pub fn verdict(&self, text: &str) -> Verdict {
        self.evaluate(text).0
    }

    /// Verdict plus the prediction behind it, or the error that forced the
    /// neutral fallback.
    pub fn evaluate(&self, text: &str) -> (Verdict, Result<Prediction>) {
        match self.predict(text) {
            Ok(prediction) => {
                let outcome = match prediction.outcome.label {
                    Label::Fake => "fake",
                    Label::Real => "real",
                };
                metrics::counter!("truthlens_predictions_total", "outcome" => outcome).increment(1);
                info!(
                    "Prediction {} with confidence {:.3} from {} models -> {}",
                    prediction.outcome.label,
                    prediction.outcome.confidence,
                    prediction.outcome.models_used,
                    prediction.score.scale
                );
                (prediction.verdict(), Ok(prediction))
            }
            Err(e) => {
                metrics::counter!("truthlens_predictions_total", "outcome" => "fallback")
                    .increment(1);
                warn!("Falling back to neutral verdict: {}", e);
                (Verdict::NEUTRAL, Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_short_circuits() {
        let pipeline =
            EnsemblePipeline::from_config(ClassifierConfig::default().with_model_dir("/nonexistent"));

        assert!(matches!(pipeline.predict("   \n\t"), Err(Error::EmptyInput)));
        // no load attempt was made
        assert!(!pipeline.registry().is_loaded());
        assert_eq!(pipeline.verdict(""), Verdict::NEUTRAL);
    }

    #[test]
    fn test_missing_models_fall_back_to_neutral() {
        let pipeline =
            EnsemblePipeline::from_config(ClassifierConfig::default().with_model_dir("/nonexistent"));

        assert!(pipeline.predict("Some headline").unwrap_err().is_fatal());
        assert_eq!(pipeline.verdict("Some headline"), Verdict(3, 0.5));
    }

    #[test]
    fn test_clones_share_registry() {
        let pipeline = EnsemblePipeline::from_config(ClassifierConfig::default());
        let clone = pipeline.clone();
        assert!(Arc::ptr_eq(pipeline.registry(), clone.registry()));
    }
}
