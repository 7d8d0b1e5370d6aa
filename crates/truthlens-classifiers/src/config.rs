//! Configuration for model discovery and loading

use crate::features::StopwordSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use truthlens_core::{Error, ModelRole, Result};

/// Configuration for the classical ensemble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Fixed model directory; when unset, `search_paths` are probed
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    /// Candidate directories, first one holding the vectorizer wins
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,

    /// Vectorizer artifact file name inside the model directory
    #[serde(default = "default_vectorizer_file")]
    pub vectorizer: PathBuf,

    /// Per-role overrides
    #[serde(default)]
    pub models: HashMap<ModelRole, ModelEntrySpec>,

    /// Stopword source used during normalization
    #[serde(default)]
    pub stopwords: StopwordSource,
}

/// Per-role model entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntrySpec {
    /// Disabled roles are reported absent without touching the disk
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Artifact file name, relative to the model directory
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for ModelEntrySpec {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

/// Where stopwords come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StopwordSource {
    /// Built-in English list
    #[default]
    Builtin,

    /// No stopwords at all
    None,

    /// One word per line
    File { path: PathBuf },
}

impl StopwordSource {
    /// Materialize the set. An unreadable file degrades to the empty set.
    pub fn load(&self) -> StopwordSet {
        match self {
            Self::Builtin => StopwordSet::english(),
            Self::None => StopwordSet::empty(),
            Self::File { path } => StopwordSet::from_file(path),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            search_paths: default_search_paths(),
            vectorizer: default_vectorizer_file(),
            models: HashMap::new(),
            stopwords: StopwordSource::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("invalid classifier config: {}", e)))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Pin the model directory, bypassing the search paths
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Whether `role` should be loaded
    pub fn is_enabled(&self, role: ModelRole) -> bool {
        self.models.get(&role).map_or(true, |entry| entry.enabled)
    }

    /// Artifact path for `role` inside `model_dir`
    pub fn artifact_path(&self, model_dir: &Path, role: ModelRole) -> PathBuf {
        match self.models.get(&role).and_then(|entry| entry.file.as_ref()) {
            Some(file) => model_dir.join(file),
            None => model_dir.join(role.default_artifact()),
        }
    }

    /// Vectorizer artifact path inside `model_dir`
    pub fn vectorizer_path(&self, model_dir: &Path) -> PathBuf {
        model_dir.join(&self.vectorizer)
    }

    /// Roles that will be attempted, in execution order
    pub fn enabled_roles(&self) -> Vec<ModelRole> {
        ModelRole::ALL
            .into_iter()
            .filter(|role| self.is_enabled(*role))
            .collect()
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("./models"), PathBuf::from("./fakenews-models")];
    if let Some(data_dir) = dirs::data_dir() {
        paths.push(data_dir.join("truthlens").join("models"));
    }
    paths
}

fn default_vectorizer_file() -> PathBuf {
    PathBuf::from("tfidf_vectorizer.json")
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_config_yaml() {
        let yaml = r#"
model_dir: /opt/truthlens/models
vectorizer: vectorizer.json

models:
  decision_tree:
    enabled: false
  random_forest:
    file: forest-v2.json

stopwords:
  type: file
  path: ./stopwords.txt
"#;

        let config = ClassifierConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.model_dir, Some(PathBuf::from("/opt/truthlens/models")));
        assert!(!config.is_enabled(ModelRole::DecisionTree));
        assert!(config.is_enabled(ModelRole::BernoulliNb));
        assert_eq!(
            config.enabled_roles(),
            vec![ModelRole::BernoulliNb, ModelRole::PcaBased, ModelRole::RandomForest]
        );
        assert_eq!(
            config.stopwords,
            StopwordSource::File {
                path: PathBuf::from("./stopwords.txt")
            }
        );

        let dir = Path::new("/m");
        assert_eq!(
            config.artifact_path(dir, ModelRole::RandomForest),
            PathBuf::from("/m/forest-v2.json")
        );
        assert_eq!(
            config.artifact_path(dir, ModelRole::PcaBased),
            PathBuf::from("/m/pca_based.json")
        );
        assert_eq!(config.vectorizer_path(dir), PathBuf::from("/m/vectorizer.json"));
    }

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::from_yaml("{}").unwrap();

        assert!(config.model_dir.is_none());
        assert_eq!(config.search_paths[0], PathBuf::from("./models"));
        assert_eq!(config.search_paths[1], PathBuf::from("./fakenews-models"));
        assert_eq!(config.vectorizer, PathBuf::from("tfidf_vectorizer.json"));
        assert_eq!(config.stopwords, StopwordSource::Builtin);
        assert_eq!(config.enabled_roles().len(), 4);
    }

    #[test]
    fn test_stopword_sources() {
        let config = ClassifierConfig::from_yaml("stopwords:\n  type: none\n").unwrap();
        assert!(config.stopwords.load().is_empty());
        assert_eq!(StopwordSource::Builtin.load().len(), 179);

        let missing = StopwordSource::File {
            path: PathBuf::from("/nonexistent/stopwords.txt"),
        };
        assert!(missing.load().is_empty());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let yaml = "models:\n  svm:\n    enabled: true\n";
        assert!(ClassifierConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_with_model_dir() {
        let config = ClassifierConfig::default().with_model_dir("/tmp/models");
        assert_eq!(config.model_dir, Some(PathBuf::from("/tmp/models")));
    }
}
