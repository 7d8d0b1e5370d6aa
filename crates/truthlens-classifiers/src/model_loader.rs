//! Artifact deserialization and model directory discovery

use crate::config::ClassifierConfig;
use crate::features::{TfidfArtifact, TfidfVectorizer};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use truthlens_core::{Error, Result};

/// Deserialize one JSON artifact
pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Load the shared vectorizer. Any failure is fatal to the caller.
pub fn load_vectorizer(path: &Path) -> Result<TfidfVectorizer> {
    if !path.is_file() {
        return Err(Error::vectorizer(format!(
            "vectorizer artifact not found: {}",
            path.display()
        )));
    }

    load_artifact::<TfidfArtifact>(path)
        .and_then(TfidfVectorizer::from_artifact)
        .map_err(|e| Error::vectorizer(format!("{}: {}", path.display(), e)))
}

/// Pick the model directory.
///
/// A configured `model_dir` must exist; otherwise the first search path that
/// contains the vectorizer artifact is used.
pub fn resolve_model_dir(config: &ClassifierConfig) -> Result<PathBuf> {
    if let Some(dir) = &config.model_dir {
        if dir.is_dir() {
            return Ok(dir.clone());
        }
        return Err(Error::ModelDirNotFound {
            searched: vec![dir.clone()],
        });
    }

    for dir in &config.search_paths {
        let candidate = config.vectorizer_path(dir);
        debug!("Probing {} for model artifacts", candidate.display());
        if candidate.is_file() {
            return Ok(dir.clone());
        }
    }

    Err(Error::ModelDirNotFound {
        searched: config.search_paths.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClassifierConfig::default().with_model_dir(dir.path());
        assert_eq!(resolve_model_dir(&config).unwrap(), dir.path());
    }

    #[test]
    fn test_resolve_missing_configured_dir() {
        let config = ClassifierConfig::default().with_model_dir("/nonexistent/truthlens");
        assert!(matches!(
            resolve_model_dir(&config),
            Err(Error::ModelDirNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_search_paths_require_vectorizer() {
        let empty = tempfile::tempdir().unwrap();
        let populated = tempfile::tempdir().unwrap();
        fs::write(populated.path().join("tfidf_vectorizer.json"), "{}").unwrap();

        let config = ClassifierConfig {
            search_paths: vec![empty.path().to_path_buf(), populated.path().to_path_buf()],
            ..ClassifierConfig::default()
        };
        assert_eq!(resolve_model_dir(&config).unwrap(), populated.path());

        let config = ClassifierConfig {
            search_paths: vec![empty.path().to_path_buf()],
            ..ClassifierConfig::default()
        };
        match resolve_model_dir(&config) {
            Err(Error::ModelDirNotFound { searched }) => assert_eq!(searched.len(), 1),
            other => panic!("expected ModelDirNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_vectorizer_errors_are_vectorizer_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tfidf_vectorizer.json");

        assert!(matches!(
            load_vectorizer(&path),
            Err(Error::VectorizerUnavailable(_))
        ));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_vectorizer(&path),
            Err(Error::VectorizerUnavailable(_))
        ));
    }

    #[test]
    fn test_load_vectorizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tfidf_vectorizer.json");
        fs::write(&path, r#"{"vocabulary": {"fake": 0, "news": 1}, "idf": [1.5, 1.0]}"#).unwrap();

        let vectorizer = load_vectorizer(&path).unwrap();
        assert_eq!(vectorizer.n_features(), 2);
    }
}
