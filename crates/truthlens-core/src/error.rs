//! Error types for TruthLens

use crate::types::ModelRole;
use std::path::PathBuf;

/// Result type alias using TruthLens' Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for TruthLens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No model directory could be resolved
    #[error("model directory not found (searched: {searched:?})")]
    ModelDirNotFound { searched: Vec<PathBuf> },

    /// The shared vectorizer could not be loaded
    #[error("vectorizer unavailable: {0}")]
    VectorizerUnavailable(String),

    /// Every classifier slot is absent after loading
    #[error("no classifiers could be loaded")]
    NoClassifiersLoaded,

    /// A single model artifact failed to load
    #[error("failed to load {role} artifact: {reason}")]
    ArtifactLoad { role: ModelRole, reason: String },

    /// An artifact was readable but structurally inconsistent
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Feature vector width does not match what a model was trained on
    #[error("feature shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// No model produced a result for this call
    #[error("no models were able to make predictions")]
    NoPredictions,

    /// Input text was empty or whitespace-only
    #[error("input text is empty")]
    EmptyInput,

    /// Tensor operation errors
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact deserialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new artifact load error for a model role
    pub fn artifact_load(role: ModelRole, reason: impl Into<String>) -> Self {
        Self::ArtifactLoad {
            role,
            reason: reason.into(),
        }
    }

    /// Create a new invalid artifact error
    pub fn invalid_artifact(msg: impl Into<String>) -> Self {
        Self::InvalidArtifact(msg.into())
    }

    /// Create a new vectorizer error
    pub fn vectorizer(msg: impl Into<String>) -> Self {
        Self::VectorizerUnavailable(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error leaves the pipeline without any usable signal.
    ///
    /// Degraded failures (one model failing to load or score) are handled
    /// where they occur and never reach the caller; everything that does reach
    /// the caller and reports `true` here maps to the neutral verdict.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ArtifactLoad { .. } | Self::ShapeMismatch { .. })
    }
}
