use anyhow::Result;
use serde::Serialize;
use stats::{EvaluationResult, Predictor, evaluate_model, naive_baseline};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::windows::Windows;

/// Model accuracy next to the naive "same as yesterday" forecast.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub symbol: String,
    pub evaluation: EvaluationResult,
    /// MAE of predicting each true value with the previous one.
    pub baseline_mae: f64,
    /// `1 - mae / baseline_mae`; positive when the model beats the baseline.
    /// None when the baseline is exact.
    pub skill: Option<f64>,
}

impl ForecastReport {
    pub fn new(symbol: impl Into<String>, evaluation: EvaluationResult) -> Result<Self> {
        let baseline_mae = naive_baseline(&evaluation.ground_truth)?;
        let skill = (baseline_mae > 0.0).then(|| 1.0 - evaluation.mae / baseline_mae);

        Ok(Self {
            symbol: symbol.into(),
            evaluation,
            baseline_mae,
            skill,
        })
    }

    pub fn beats_baseline(&self) -> bool {
        self.evaluation.mae < self.baseline_mae
    }

    /// Generate a text report
    pub fn write_text<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "Forecast Report: {}", self.symbol)?;
        writeln!(file, "{}", "=".repeat(40))?;
        writeln!(file)?;
        writeln!(file, "Test cases: {}", self.evaluation.len())?;
        writeln!(file, "Model MSE: {:.6}", self.evaluation.mse)?;
        writeln!(file, "Model RMSE: {:.6}", self.evaluation.rmse())?;
        writeln!(file, "Model MAE: {:.6}", self.evaluation.mae)?;
        writeln!(file, "Naive baseline MAE: {:.6}", self.baseline_mae)?;
        match self.skill {
            Some(skill) => writeln!(file, "Skill vs baseline: {:.4}", skill)?,
            None => writeln!(file, "Skill vs baseline: n/a")?,
        }

        Ok(())
    }

    /// Generate a JSON report
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Score `model` on a set of test windows and compare it with the baseline.
pub fn evaluate_forecast<P: Predictor + ?Sized>(
    symbol: &str,
    model: &P,
    test: &Windows,
) -> Result<ForecastReport> {
    let evaluation = evaluate_model(model, &test.features, &test.targets)?;
    let report = ForecastReport::new(symbol, evaluation)?;

    info!(
        symbol,
        mae = report.evaluation.mae,
        baseline_mae = report.baseline_mae,
        beats_baseline = report.beats_baseline(),
        "forecast evaluated"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::make_windows;
    use stats::{FnPredictor, NaivePredictor, evaluate};
    use tempfile::tempdir;

    #[test]
    fn test_report_against_baseline() {
        let truth = vec![100.0, 102.0, 105.0, 103.0, 107.0];
        let predictions = vec![100.5, 102.5, 104.5, 103.5, 106.5];
        let evaluation = evaluate(&predictions, &truth).unwrap();

        let report = ForecastReport::new("SPY", evaluation).unwrap();
        assert!((report.baseline_mae - 2.75).abs() < 1e-12);
        assert!((report.evaluation.mae - 0.5).abs() < 1e-12);
        assert!(report.beats_baseline());
        assert!((report.skill.unwrap() - (1.0 - 0.5 / 2.75)).abs() < 1e-12);
    }

    #[test]
    fn test_constant_truth_has_no_skill() {
        let evaluation = evaluate(&[1.0, 2.0], &[5.0, 5.0]).unwrap();
        let report = ForecastReport::new("FLAT", evaluation).unwrap();
        assert_eq!(report.baseline_mae, 0.0);
        assert!(report.skill.is_none());
        assert!(!report.beats_baseline());
    }

    #[test]
    fn test_single_case_is_insufficient() {
        let evaluation = evaluate(&[1.0], &[1.0]).unwrap();
        assert!(ForecastReport::new("ONE", evaluation).is_err());
    }

    #[test]
    fn test_evaluate_forecast_with_naive_model() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + (i % 3) as f64).collect();
        let windows = make_windows(&values, 5).unwrap();

        let naive = evaluate_forecast("SPY", &NaivePredictor, &windows).unwrap();
        assert_eq!(naive.evaluation.len(), 15);

        let perfect_truth = windows.targets.clone();
        let lookup = FnPredictor(move |w: &[f64]| {
            // pattern repeats every 3 steps
            w[w.len() - 3]
        });
        let perfect = evaluate_forecast("SPY", &lookup, &windows).unwrap();
        assert_eq!(perfect.evaluation.mae, 0.0);
        assert_eq!(perfect.evaluation.ground_truth, perfect_truth);
        assert!(perfect.beats_baseline());
    }

    #[test]
    fn test_write_reports() {
        let dir = tempdir().unwrap();
        let evaluation = evaluate(&[1.0, 2.0, 3.0], &[1.0, 2.5, 2.0]).unwrap();
        let report = ForecastReport::new("AAPL", evaluation).unwrap();

        let text_path = dir.path().join("report.txt");
        report.write_text(&text_path).unwrap();
        let text = std::fs::read_to_string(&text_path).unwrap();
        assert!(text.contains("Forecast Report: AAPL"));
        assert!(text.contains("Naive baseline MAE"));

        let json_path = dir.path().join("report.json");
        report.write_json(&json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["evaluation"]["predictions"].as_array().unwrap().len(), 3);
        assert!(json["baseline_mae"].as_f64().unwrap() > 0.0);
    }
}
