//! Process-wide model registry with one-time initialization

use crate::classifier::Classifier;
use crate::config::ClassifierConfig;
use crate::features::{FeaturePipeline, TextNormalizer};
use crate::model_loader::{load_vectorizer, resolve_model_dir};
use crate::models::LoadedClassifier;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};
use truthlens_core::{Error, ModelRole, Result};

/// One role's slot; `None` when the artifact was missing, invalid or disabled
#[derive(Debug, Clone)]
pub struct ModelSlot {
    pub role: ModelRole,
    pub classifier: Option<LoadedClassifier>,
}

/// Everything deserialized from the model directory
#[derive(Debug)]
pub struct LoadedModels {
    model_dir: PathBuf,
    features: FeaturePipeline,
    slots: Vec<ModelSlot>,
}

impl LoadedModels {
    /// Load the vectorizer and every enabled classifier.
    ///
    /// Fails when the directory or vectorizer is unusable, or when no
    /// classifier could be loaded. Single classifier failures only log.
    pub fn load(config: &ClassifierConfig) -> Result<Self> {
        let model_dir = resolve_model_dir(config)?;
        info!("Loading models from {}", model_dir.display());

        let vectorizer = load_vectorizer(&config.vectorizer_path(&model_dir))?;
        let normalizer = TextNormalizer::new(config.stopwords.load());
        let features = FeaturePipeline::new(normalizer, vectorizer);

        let mut slots = Vec::with_capacity(ModelRole::ALL.len());
        for role in ModelRole::ALL {
            if !config.is_enabled(role) {
                debug!("Model {} disabled in config", role);
                slots.push(ModelSlot {
                    role,
                    classifier: None,
                });
                continue;
            }

            let path = config.artifact_path(&model_dir, role);
            let classifier = match LoadedClassifier::load(role, &path) {
                Ok(classifier) => {
                    if classifier.n_features() != features.n_features() {
                        warn!(
                            "Model {} expects {} features but the vectorizer produces {}",
                            role,
                            classifier.n_features(),
                            features.n_features()
                        );
                    }
                    info!("✓ Loaded model: {}", role);
                    Some(classifier)
                }
                Err(e) => {
                    warn!("✗ Failed to load model {}: {}", role, e);
                    None
                }
            };
            slots.push(ModelSlot { role, classifier });
        }

        let loaded = slots.iter().filter(|s| s.classifier.is_some()).count();
        if loaded == 0 {
            return Err(Error::NoClassifiersLoaded);
        }
        info!(
            "Model registry initialized with {}/{} models",
            loaded,
            ModelRole::ALL.len()
        );

        Ok(Self {
            model_dir,
            features,
            slots,
        })
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Shared normalizer plus vectorizer
    pub fn features(&self) -> &FeaturePipeline {
        &self.features
    }

    pub fn slots(&self) -> &[ModelSlot] {
        &self.slots
    }

    /// Present classifiers, in role order
    pub fn classifiers(&self) -> Vec<&dyn Classifier> {
        self.slots
            .iter()
            .filter_map(|slot| slot.classifier.as_ref())
            .map(|c| c as &dyn Classifier)
            .collect()
    }

    pub fn available_roles(&self) -> Vec<ModelRole> {
        self.slots
            .iter()
            .filter(|slot| slot.classifier.is_some())
            .map(|slot| slot.role)
            .collect()
    }

    pub fn missing_roles(&self) -> Vec<ModelRole> {
        self.slots
            .iter()
            .filter(|slot| slot.classifier.is_none())
            .map(|slot| slot.role)
            .collect()
    }

    /// Vectorizer output width
    pub fn n_features(&self) -> usize {
        self.features.n_features()
    }
}

/// Registry owning the loaded models.
///
/// The first successful [`ModelRegistry::ensure_loaded`] fixes the state for
/// the life of the registry. Fatal failures leave it unloaded.
pub struct ModelRegistry {
    config: ClassifierConfig,
    loaded: OnceLock<Arc<LoadedModels>>,
    init_guard: Mutex<()>,
}

impl ModelRegistry {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            loaded: OnceLock::new(),
            init_guard: Mutex::new(()),
        }
    }

    /// Load everything on first call; later calls return the cached state.
    pub fn ensure_loaded(&self) -> Result<Arc<LoadedModels>> {
        if let Some(models) = self.loaded.get() {
            return Ok(Arc::clone(models));
        }

        let _guard = self.init_guard.lock();
        // another caller may have finished while we waited
        if let Some(models) = self.loaded.get() {
            return Ok(Arc::clone(models));
        }

        let models = Arc::new(LoadedModels::load(&self.config)?);
        Ok(Arc::clone(self.loaded.get_or_init(|| models)))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Loaded state, if initialization already succeeded
    pub fn loaded(&self) -> Option<&Arc<LoadedModels>> {
        self.loaded.get()
    }

    /// Empty until loaded
    pub fn available_roles(&self) -> Vec<ModelRole> {
        self.loaded()
            .map(|m| m.available_roles())
            .unwrap_or_default()
    }

    /// All roles until loaded
    pub fn missing_roles(&self) -> Vec<ModelRole> {
        self.loaded()
            .map(|m| m.missing_roles())
            .unwrap_or_else(|| ModelRole::ALL.to_vec())
    }

    pub fn model_dir(&self) -> Option<&Path> {
        self.loaded().map(|m| m.model_dir())
    }

    pub fn n_features(&self) -> Option<usize> {
        self.loaded().map(|m| m.n_features())
    }
}

/// Shared model registry for application-wide use
pub struct SharedRegistry {
    registry: Arc<ModelRegistry>,
}

impl SharedRegistry {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Get reference to the registry
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Clone the Arc for sharing across threads
    pub fn clone_arc(&self) -> Arc<ModelRegistry> {
        Arc::clone(&self.registry)
    }
}

impl Clone for SharedRegistry {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}
