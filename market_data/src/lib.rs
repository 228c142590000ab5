//! Historical OHLCV downloads from the Yahoo Finance chart endpoint.

pub mod error;
pub mod ohlcv;
pub mod period;
pub mod yahoo;

pub use error::DataError;
pub use ohlcv::{OhlcvBar, OhlcvSeries};
pub use period::{Interval, Period};
pub use yahoo::{ClientConfig, YahooClient, normalize_symbol, parse_chart};
