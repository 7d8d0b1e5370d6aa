//! Pre-fitted TF-IDF vectorizer

use super::FeatureVector;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use truthlens_core::{Error, Result};

/// Row normalisation applied after idf weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    pub idf: Vec<f32>,

    /// Inclusive n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Row normalisation (`null` disables it)
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Regex selecting tokens
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
}

/// Vectorizer ready for transforms; never re-fitted
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    lowercase: bool,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Validate an artifact and compile its token pattern
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self> {
        if artifact.vocabulary.is_empty() {
            return Err(Error::invalid_artifact("vectorizer vocabulary is empty"));
        }
        if artifact.idf.len() != artifact.vocabulary.len() {
            return Err(Error::invalid_artifact(format!(
                "vectorizer has {} idf weights for {} terms",
                artifact.idf.len(),
                artifact.vocabulary.len()
            )));
        }
        if let Some((term, column)) = artifact
            .vocabulary
            .iter()
            .find(|(_, column)| **column >= artifact.idf.len())
        {
            return Err(Error::invalid_artifact(format!(
                "vocabulary term '{}' maps to column {} outside {} features",
                term,
                column,
                artifact.idf.len()
            )));
        }
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::invalid_artifact(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }

        let token_pattern = Regex::new(&artifact.token_pattern).map_err(|e| {
            Error::invalid_artifact(format!("invalid token pattern: {}", e))
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            lowercase: artifact.lowercase,
            token_pattern,
        })
    }

    /// Output dimensionality
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Transform one normalized document into a dense feature vector
    pub fn transform(&self, document: &str) -> Result<FeatureVector> {
        let document = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&document)
            .map(|m| m.as_str())
            .collect();

        let mut counts: HashMap<usize, f32> = HashMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&column) = self.vocabulary.get(&term) {
                    *counts.entry(column).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut values = vec![0.0f32; self.n_features()];
        for (column, tf) in counts {
            let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
            values[column] = tf * self.idf[column];
        }

        if let Some(norm) = self.norm {
            let total = match norm {
                Norm::L1 => values.iter().map(|v| v.abs()).sum::<f32>(),
                Norm::L2 => values.iter().map(|v| v * v).sum::<f32>().sqrt(),
            };
            if total > 0.0 {
                values.iter_mut().for_each(|v| *v /= total);
            }
        }

        FeatureVector::from_dense(values)
    }
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(terms: &[&str]) -> TfidfArtifact {
        TfidfArtifact {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.to_string(), i))
                .collect(),
            idf: vec![1.0; terms.len()],
            ngram_range: (1, 1),
            sublinear_tf: false,
            norm: Some(Norm::L2),
            lowercase: true,
            token_pattern: default_token_pattern(),
        }
    }

    #[test]
    fn test_transform_l2_normalised() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact(&["govern", "polici"])).unwrap();
        let vector = vectorizer.transform("govern polici unknown").unwrap();

        let values = vector.values();
        assert_eq!(values.len(), 2);
        assert!((values[0] - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((values[1] - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_empty_document_is_zero_vector() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact(&["govern", "polici"])).unwrap();
        let vector = vectorizer.transform("").unwrap();

        assert_eq!(vector.len(), 2);
        assert!(vector.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_bigrams_and_sublinear_tf() {
        let mut raw = artifact(&["fake", "fake news"]);
        raw.ngram_range = (1, 2);
        raw.sublinear_tf = true;
        raw.norm = None;
        let vectorizer = TfidfVectorizer::from_artifact(raw).unwrap();

        let vector = vectorizer.transform("fake news fake").unwrap();
        let values = vector.values();
        assert!((values[0] - (1.0 + 2.0f32.ln())).abs() < 1e-6);
        assert!((values[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_character_tokens_ignored() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact(&["a", "news"])).unwrap();
        let vector = vectorizer.transform("a news").unwrap();
        assert_eq!(vector.values()[0], 0.0);
        assert!(vector.values()[1] > 0.0);
    }

    #[test]
    fn test_rejects_inconsistent_artifacts() {
        let mut raw = artifact(&["govern", "polici"]);
        raw.idf.pop();
        assert!(TfidfVectorizer::from_artifact(raw).is_err());

        let mut raw = artifact(&["govern"]);
        raw.ngram_range = (0, 1);
        assert!(TfidfVectorizer::from_artifact(raw).is_err());

        let mut raw = artifact(&["govern"]);
        raw.vocabulary.insert("polici".to_string(), 5);
        raw.idf.push(1.0);
        assert!(TfidfVectorizer::from_artifact(raw).is_err());

        assert!(TfidfVectorizer::from_artifact(artifact(&[])).is_err());
    }
}
