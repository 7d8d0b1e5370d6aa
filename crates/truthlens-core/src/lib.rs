//! TruthLens Core
//!
//! Value types and error handling shared by the TruthLens crates.
//!
//! This crate provides:
//! - The binary news label (`Label`) and the six-level LIAR truthfulness scale
//! - Per-model results and the aggregated ensemble outcome
//! - The `[ordinal, confidence]` verdict emitted to callers
//! - The error taxonomy used across loading, scoring and aggregation

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{EnsembleOutcome, Label, LiarScale, ModelResult, ModelRole, OrdinalScore, Verdict};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        EnsembleOutcome, Label, LiarScale, ModelResult, ModelRole, OrdinalScore, Verdict,
    };
}
