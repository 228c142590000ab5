use tracing::info;

use crate::error::EvalError;
use crate::metrics::{EvaluationResult, evaluate};

/// Anything that maps a batch of fixed-length feature windows to one
/// forecast per window.
pub trait Predictor {
    fn predict(&self, batch: &[Vec<f64>]) -> Vec<f64>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, batch: &[Vec<f64>]) -> Vec<f64> {
        (**self).predict(batch)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, batch: &[Vec<f64>]) -> Vec<f64> {
        (**self).predict(batch)
    }
}

/// Adapts a per-window function into a [`Predictor`].
pub struct FnPredictor<F>(pub F);

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn predict(&self, batch: &[Vec<f64>]) -> Vec<f64> {
        batch.iter().map(|window| (self.0)(window)).collect()
    }
}

/// Persistence forecast: the last value of each window.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaivePredictor;

impl Predictor for NaivePredictor {
    fn predict(&self, batch: &[Vec<f64>]) -> Vec<f64> {
        batch
            .iter()
            .map(|window| window.last().copied().unwrap_or(f64::NAN))
            .collect()
    }
}

/// Run `model` over `features` and score its output against `ground_truth`.
pub fn evaluate_model<P: Predictor + ?Sized>(
    model: &P,
    features: &[Vec<f64>],
    ground_truth: &[f64],
) -> Result<EvaluationResult, EvalError> {
    if features.len() != ground_truth.len() {
        return Err(EvalError::LengthMismatch {
            predictions: features.len(),
            ground_truth: ground_truth.len(),
        });
    }

    let predictions = model.predict(features);
    let result = evaluate(&predictions, ground_truth)?;

    info!(cases = result.len(), mse = result.mse, mae = result.mae, "model evaluated");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::naive_baseline;

    struct ConstantModel(f64);

    impl Predictor for ConstantModel {
        fn predict(&self, batch: &[Vec<f64>]) -> Vec<f64> {
            vec![self.0; batch.len()]
        }
    }

    struct TruncatingModel;

    impl Predictor for TruncatingModel {
        fn predict(&self, batch: &[Vec<f64>]) -> Vec<f64> {
            vec![0.0; batch.len().saturating_sub(1)]
        }
    }

    fn windows(values: &[f64], lookback: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let features = (lookback..values.len())
            .map(|t| values[t - lookback..t].to_vec())
            .collect();
        let targets = values[lookback..].to_vec();
        (features, targets)
    }

    #[test]
    fn test_evaluate_model_returns_one_prediction_per_case() {
        let features = vec![vec![0.0; 60]; 50];
        let truth: Vec<f64> = (0..50).map(|i| i as f64 / 50.0).collect();

        let result = evaluate_model(&ConstantModel(0.5), &features, &truth).unwrap();
        assert_eq!(result.predictions.len(), truth.len());
        assert!(result.mse >= 0.0);
        assert!(result.mae >= 0.0);
    }

    #[test]
    fn test_naive_predictor_reproduces_baseline() {
        let values = vec![100.0, 102.0, 105.0, 103.0, 107.0, 106.0];
        let lookback = 3;
        let (features, targets) = windows(&values, lookback);

        let result = evaluate_model(&NaivePredictor, &features, &targets).unwrap();
        let baseline = naive_baseline(&values[lookback - 1..]).unwrap();
        assert!((result.mae - baseline).abs() < 1e-12);
    }

    #[test]
    fn test_fn_predictor_mean_of_window() {
        let model = FnPredictor(|w: &[f64]| w.iter().sum::<f64>() / w.len() as f64);
        let features = vec![vec![1.0, 3.0], vec![2.0, 4.0]];
        let result = evaluate_model(&model, &features, &[2.0, 3.0]).unwrap();
        assert_eq!(result.predictions, vec![2.0, 3.0]);
        assert_eq!(result.mae, 0.0);
    }

    #[test]
    fn test_boxed_model() {
        let model: Box<dyn Predictor> = Box::new(ConstantModel(1.0));
        let result = evaluate_model(&model, &[vec![0.0]], &[1.0]).unwrap();
        assert_eq!(result.mse, 0.0);
    }

    #[test]
    fn test_feature_target_mismatch() {
        let err = evaluate_model(&ConstantModel(0.0), &[vec![1.0]], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, EvalError::LengthMismatch { .. }));
    }

    #[test]
    fn test_model_output_length_checked() {
        let features = vec![vec![1.0]; 3];
        let err = evaluate_model(&TruncatingModel, &features, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            EvalError::LengthMismatch {
                predictions: 2,
                ground_truth: 3
            }
        );
    }
}
