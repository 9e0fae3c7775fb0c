//! Evaluation error types.

/// Errors that can occur while evaluating series.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    /// The quality report could not be turned into JSON.
    #[error("failed to encode quality report: {0}")]
    Json(#[from] serde_json::Error),
}
