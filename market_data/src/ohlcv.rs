use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One bar of market history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// True when every price and the volume are finite numbers.
    pub fn is_complete(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Chronologically ordered, gap-free price history for one symbol.
///
/// Every bar has all five fields present and finite, and timestamps are
/// strictly increasing. The only way to build one is [`OhlcvSeries::from_bars`],
/// which enforces both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcvSeries {
    symbol: String,
    bars: Vec<OhlcvBar>,
}

impl OhlcvSeries {
    /// Build a series, dropping incomplete bars and bars that do not move
    /// strictly forward in time.
    pub fn from_bars(symbol: impl Into<String>, bars: impl IntoIterator<Item = OhlcvBar>) -> Self {
        let symbol = symbol.into();
        let mut kept: Vec<OhlcvBar> = Vec::new();
        let mut dropped = 0usize;

        for bar in bars {
            let in_order = kept.last().is_none_or(|prev| bar.timestamp > prev.timestamp);
            if bar.is_complete() && in_order {
                kept.push(bar);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            debug!(symbol = %symbol, dropped, kept = kept.len(), "dropped incomplete or out-of-order bars");
        }

        Self { symbol, bars: kept }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OhlcvBar> {
        self.bars.iter()
    }

    pub fn first(&self) -> Option<&OhlcvBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&OhlcvBar> {
        self.bars.last()
    }

    /// Closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn into_bars(self) -> Vec<OhlcvBar> {
        self.bars
    }
}

impl<'a> IntoIterator for &'a OhlcvSeries {
    type Item = &'a OhlcvBar;
    type IntoIter = std::slice::Iter<'a, OhlcvBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
