use thiserror::Error;

/// Errors raised when evaluation inputs are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("insufficient data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("length mismatch: {predictions} predictions vs {ground_truth} true values")]
    LengthMismatch {
        predictions: usize,
        ground_truth: usize,
    },
}
