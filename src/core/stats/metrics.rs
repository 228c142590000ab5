use serde::Serialize;
use tracing::debug;

use crate::error::EvalError;

/// Model error metrics together with the sequences they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Mean squared error.
    pub mse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Model forecasts, in the order they were supplied.
    pub predictions: Vec<f64>,
    /// True values, same length as `predictions`.
    pub ground_truth: Vec<f64>,
}

impl EvaluationResult {
    pub fn rmse(&self) -> f64 {
        self.mse.sqrt()
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

fn check_lengths(predictions: &[f64], ground_truth: &[f64]) -> Result<(), EvalError> {
    if predictions.len() != ground_truth.len() || predictions.is_empty() {
        return Err(EvalError::LengthMismatch {
            predictions: predictions.len(),
            ground_truth: ground_truth.len(),
        });
    }
    Ok(())
}

/// MAE of forecasting each value with the one before it.
///
/// For `values = [v0, v1, ..., vn]` this is the mean of `|v[i] - v[i-1]|`
/// over `i = 1..=n`. A constant sequence gives exactly `0.0`.
pub fn naive_baseline(values: &[f64]) -> Result<f64, EvalError> {
    if values.len() < 2 {
        return Err(EvalError::InsufficientData {
            needed: 2,
            got: values.len(),
        });
    }

    let n = values.len() - 1;
    let total: f64 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    Ok(total / n as f64)
}

pub fn mean_squared_error(predictions: &[f64], ground_truth: &[f64]) -> Result<f64, EvalError> {
    check_lengths(predictions, ground_truth)?;
    let total: f64 = predictions
        .iter()
        .zip(ground_truth)
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    Ok(total / predictions.len() as f64)
}

pub fn mean_absolute_error(predictions: &[f64], ground_truth: &[f64]) -> Result<f64, EvalError> {
    check_lengths(predictions, ground_truth)?;
    let total: f64 = predictions
        .iter()
        .zip(ground_truth)
        .map(|(p, t)| (p - t).abs())
        .sum();
    Ok(total / predictions.len() as f64)
}

pub fn root_mean_squared_error(
    predictions: &[f64],
    ground_truth: &[f64],
) -> Result<f64, EvalError> {
    Ok(mean_squared_error(predictions, ground_truth)?.sqrt())
}

/// Score forecasts against the values they were meant to predict.
///
/// Both slices must have the same, non-zero length.
pub fn evaluate(predictions: &[f64], ground_truth: &[f64]) -> Result<EvaluationResult, EvalError> {
    let mse = mean_squared_error(predictions, ground_truth)?;
    let mae = mean_absolute_error(predictions, ground_truth)?;

    debug!(n = predictions.len(), mse, mae, "evaluated forecasts");

    Ok(EvaluationResult {
        mse,
        mae,
        predictions: predictions.to_vec(),
        ground_truth: ground_truth.to_vec(),
    })
}
