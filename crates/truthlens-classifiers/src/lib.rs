//! TruthLens Classifiers
//!
//! Classical fake-news ensemble: a shared text normalizer and TF-IDF
//! vectorizer feed four pre-trained models (Bernoulli naive Bayes, decision
//! tree, PCA + linear head, random forest). Their votes are aggregated and
//! mapped onto the six-level LIAR truthfulness scale.
//!
//! Models load once per process through [`ModelRegistry`]; a missing
//! classifier degrades the ensemble, a missing vectorizer disables it.
//! [`EnsemblePipeline::verdict`] never fails and falls back to `[3, 0.5]`.

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod executor;
pub mod features;
pub mod model_loader;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod scale;

pub use aggregator::aggregate;
pub use classifier::Classifier;
pub use config::{ClassifierConfig, ModelEntrySpec, StopwordSource};
pub use executor::run_all;
pub use features::{FeaturePipeline, FeatureVector, TextNormalizer};
pub use model_loader::{load_artifact, load_vectorizer, resolve_model_dir};
pub use models::LoadedClassifier;
pub use pipeline::{EnsemblePipeline, Prediction};
pub use registry::{LoadedModels, ModelRegistry, ModelSlot, SharedRegistry};
pub use scale::{convert_to_liar_scale, scale_for, to_ordinal};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::config::ClassifierConfig;
    pub use crate::pipeline::{EnsemblePipeline, Prediction};
    pub use crate::registry::{ModelRegistry, SharedRegistry};
    pub use truthlens_core::prelude::*;
}
