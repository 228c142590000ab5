//! Stock price forecasting utilities: fetch OHLCV history, cut it into model
//! inputs and score a model's forecasts against the naive baseline.

pub mod config;
pub mod report;
pub mod windows;

pub use config::{Config, DataConfig, EvaluationConfig};
pub use report::{ForecastReport, evaluate_forecast};
pub use windows::{WindowSplit, Windows, close_windows, make_windows, split_train_test};

pub use market_data::{DataError, Interval, OhlcvBar, OhlcvSeries, Period, YahooClient};
pub use stats::{
    EvalError, EvaluationResult, FnPredictor, NaivePredictor, Predictor, evaluate, evaluate_model,
    naive_baseline,
};
