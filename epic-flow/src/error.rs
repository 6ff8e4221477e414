//! Error types for the evaluation workflow.

use thiserror::Error;

/// Result type for workflow operations.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors that can occur while driving an epic through the pipeline.
///
/// Only extraction and refinement failures abort an epic; evaluation
/// failures degrade to an `ERROR`-tier record instead, and persistence
/// failures are logged without changing the terminal outcome.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Extraction response could not be coerced to a JSON object, even
    /// after brace-delimited fallback. Fatal to the current epic.
    #[error("Extraction response is not a JSON object: {0}")]
    Parse(String),

    /// A parsed evaluation response violated the tier-membership or
    /// explanation-length rules. Consumed by the evaluator's retry loop.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generation-service failure.
    #[error("Model error: {0}")]
    Model(#[from] epic_core::EpicError),

    /// The state machine did not converge within its step bound.
    #[error("Step limit exceeded: {0} steps")]
    StepLimit(usize),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
