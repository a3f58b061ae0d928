//! Engine error types.
//!
//! Predictable conditions — unknown question, unmatched answer, untrainable
//! classifier, missing dataset — are modeled as result values and never
//! reach these variants. `EngineError` only covers the loading boundary and
//! the opaque internal-failure signal the outer layers surface as a 500.

use thiserror::Error;

/// Errors that can surface from the evaluation engine's boundaries.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The dataset source was missing or unparseable. Recoverable: callers
    /// degrade to an empty reference store instead of aborting.
    #[error("dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// Any other unexpected fault during evaluation. Never retried, never
    /// swallowed.
    #[error("internal evaluation failure: {0}")]
    Internal(String),
}

impl EngineError {
    /// Returns `true` if callers can recover locally (degrade) instead of
    /// failing the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::DatasetUnavailable(_))
    }
}
