//! Forecast error metrics and the naive persistence baseline.

pub mod error;
pub mod metrics;
pub mod predictor;

pub use error::EvalError;
pub use metrics::{
    EvaluationResult, evaluate, mean_absolute_error, mean_squared_error, naive_baseline,
    root_mean_squared_error,
};
pub use predictor::{FnPredictor, NaivePredictor, Predictor, evaluate_model};
