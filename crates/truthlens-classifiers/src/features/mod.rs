//! Text normalization and feature extraction shared by all classical models
//!
//! The pipeline is strictly deterministic:
//! 1. characters outside `[a-zA-Z]` become spaces
//! 2. lower-case, split on whitespace
//! 3. stopwords dropped
//! 4. Porter stemming
//! 5. rejoin with single spaces
//! 6. transform through the pre-fitted TF-IDF vectorizer

pub mod stemmer;
pub mod stopwords;
pub mod vectorizer;

pub use stemmer::PorterStemmer;
pub use stopwords::StopwordSet;
pub use vectorizer::{Norm, TfidfArtifact, TfidfVectorizer};

use candle_core::{Device, Tensor};
use truthlens_core::Result;

/// Dense per-call feature vector of shape `(1, n_features)`
#[derive(Debug, Clone)]
pub struct FeatureVector {
    values: Vec<f32>,
    tensor: Tensor,
}

impl FeatureVector {
    /// Build from dense values on the CPU device
    pub fn from_dense(values: Vec<f32>) -> Result<Self> {
        let tensor = Tensor::from_slice(&values, (1, values.len()), &Device::Cpu)?;
        Ok(Self { values, tensor })
    }

    /// Dimensionality
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Row tensor used by the linear heads
    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }
}

/// Steps 1-5: raw text to a normalized, stemmed document
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    stopwords: StopwordSet,
    stemmer: PorterStemmer,
}

impl TextNormalizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self {
            stopwords,
            stemmer: PorterStemmer::new(),
        }
    }

    pub fn normalize(&self, raw_text: &str) -> String {
        let letters_only: String = raw_text
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
            .collect();

        letters_only
            .to_ascii_lowercase()
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.stemmer.stem(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}

/// Full text-to-vector pipeline: normalizer plus shared vectorizer
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
}

impl FeaturePipeline {
    pub fn new(normalizer: TextNormalizer, vectorizer: TfidfVectorizer) -> Self {
        Self {
            normalizer,
            vectorizer,
        }
    }

    /// Normalize `raw_text` and vectorize it. Never fails on empty input.
    pub fn normalize_and_vectorize(&self, raw_text: &str) -> Result<FeatureVector> {
        let document = self.normalizer.normalize(raw_text);
        tracing::debug!(document = %document, "Normalized input text");
        self.vectorizer.transform(&document)
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }
}
