//! Core types for TruthLens

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary news label emitted by every classifier and by the ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    /// Class 0
    Fake,
    /// Class 1
    Real,
}

impl Label {
    /// Numeric class value (0 = FAKE, 1 = REAL)
    pub fn value(self) -> u8 {
        match self {
            Self::Fake => 0,
            Self::Real => 1,
        }
    }

    /// Canonical upper-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fake => "FAKE",
            Self::Real => "REAL",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FAKE" | "0" => Ok(Self::Fake),
            "REAL" | "1" => Ok(Self::Real),
            other => Err(crate::Error::config(format!("unknown label '{}'", other))),
        }
    }
}

/// The four classifier roles of the ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelRole {
    /// Bernoulli naive Bayes over binarized features
    BernoulliNb,
    /// Single decision tree (hard label only)
    DecisionTree,
    /// PCA projection followed by a linear head
    PcaBased,
    /// Random forest (class probabilities)
    RandomForest,
}

impl ModelRole {
    /// All roles, in load and execution order
    pub const ALL: [ModelRole; 4] = [
        Self::BernoulliNb,
        Self::DecisionTree,
        Self::PcaBased,
        Self::RandomForest,
    ];

    /// Stable snake_case name, used in logs, config keys and metrics labels
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BernoulliNb => "bernoulli_nb",
            Self::DecisionTree => "decision_tree",
            Self::PcaBased => "pca_based",
            Self::RandomForest => "random_forest",
        }
    }

    /// Artifact file name used when the config does not override it
    pub fn default_artifact(self) -> &'static str {
        match self {
            Self::BernoulliNb => "bernoulli_nb.json",
            Self::DecisionTree => "decision_tree.json",
            Self::PcaBased => "pca_based.json",
            Self::RandomForest => "random_forest.json",
        }
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelRole {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| crate::Error::config(format!("unknown model role '{}'", s)))
    }
}

/// Normalized output of one classifier for one call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    /// Role that produced this result
    pub role: ModelRole,

    /// Hard label
    pub prediction: Label,

    /// Probability of class 1 (REAL), when the model family exposes one
    pub probability: Option<f64>,
}

impl ModelResult {
    /// Result with a probability attached
    pub fn with_probability(role: ModelRole, prediction: Label, probability: f64) -> Self {
        Self {
            role,
            prediction,
            probability: Some(probability),
        }
    }

    /// Result carrying only a hard label
    pub fn label_only(role: ModelRole, prediction: Label) -> Self {
        Self {
            role,
            prediction,
            probability: None,
        }
    }
}

/// Aggregated decision of the ensemble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleOutcome {
    /// Majority label (ties resolve to REAL)
    pub label: Label,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Number of model results that were aggregated
    pub models_used: usize,
}

/// Six-level LIAR truthfulness scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiarScale {
    PantsFire = 0,
    False = 1,
    BarelyTrue = 2,
    HalfTrue = 3,
    MostlyTrue = 4,
    True = 5,
}

impl LiarScale {
    /// Ordinal code, 0 (most fake) through 5 (most real)
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// LIAR dataset label name
    pub fn name(self) -> &'static str {
        match self {
            Self::PantsFire => "pants-fire",
            Self::False => "false",
            Self::BarelyTrue => "barely-true",
            Self::HalfTrue => "half-true",
            Self::MostlyTrue => "mostly-true",
            Self::True => "true",
        }
    }
}

impl fmt::Display for LiarScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scale level paired with the confidence that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScore {
    pub scale: LiarScale,
    pub confidence: f64,
}

impl OrdinalScore {
    /// Ordinal code of the scale level
    pub fn ordinal(&self) -> u8 {
        self.scale.ordinal()
    }

    /// Externally observable `[ordinal, confidence]` pair
    pub fn verdict(&self) -> Verdict {
        Verdict(self.ordinal(), self.confidence)
    }
}

/// The two-element `[ordinal, confidence]` artifact.
///
/// Serializes as a JSON array, e.g. `[3,0.5]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict(pub u8, pub f64);

impl Verdict {
    /// Neutral fallback verdict `[3, 0.5]`
    pub const NEUTRAL: Verdict = Verdict(3, 0.5);

    /// Render as compact JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
