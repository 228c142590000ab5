use chrono::{DateTime, Utc};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::DataError;
use crate::ohlcv::{OhlcvBar, OhlcvSeries};
use crate::period::{Interval, Period};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Quote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

/// Connection settings for [`YahooClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Historical price client for the Yahoo Finance chart endpoint.
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Result<Self, DataError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chart endpoint for `symbol`, appended as a single percent-encoded
    /// path segment.
    fn chart_url(&self, symbol: &str) -> Result<Url, DataError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DataError::unavailable(symbol, format!("invalid base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| DataError::unavailable(symbol, "base url cannot take a path"))?
            .pop_if_empty()
            .push(symbol);
        Ok(url)
    }

    /// Fetch daily bars for `symbol` covering `period`.
    ///
    /// Bars with a missing open, high, low, close or volume are removed, so
    /// the result may be shorter than the requested period.
    pub async fn fetch(&self, symbol: &str, period: Period) -> Result<OhlcvSeries, DataError> {
        self.fetch_with_interval(symbol, period, Interval::Daily).await
    }

    pub async fn fetch_with_interval(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<OhlcvSeries, DataError> {
        let symbol = normalize_symbol(symbol)?;
        let url = self.chart_url(&symbol)?;

        debug!(%symbol, %period, %interval, "requesting chart history");

        let response = self
            .client
            .get(url)
            .query(&[("range", period.code()), ("interval", interval.code())])
            .send()
            .await
            .map_err(|e| DataError::unavailable(&symbol, format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DataError::unavailable(&symbol, format!("failed to read response: {}", e)))?;

        if status == StatusCode::NOT_FOUND {
            return Err(match parse_chart(&symbol, &body) {
                Err(e @ DataError::InvalidSymbol { .. }) => e,
                _ => DataError::invalid_symbol(&symbol, "provider returned 404"),
            });
        }

        if !status.is_success() {
            return Err(DataError::unavailable(&symbol, format!("HTTP error: {}", status)));
        }

        let series = parse_chart(&symbol, &body)?;
        debug!(%symbol, bars = series.len(), "chart history received");
        Ok(series)
    }
}

fn is_ticker_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')
}

/// Trim and upper-case a ticker.
///
/// Only ASCII letters, digits and `. ^ = -` are accepted, which covers
/// share classes (`BRK-B`), indices (`^GSPC`), futures and FX (`EURUSD=X`).
pub fn normalize_symbol(symbol: &str) -> Result<String, DataError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(DataError::invalid_symbol(symbol, "symbol is empty"));
    }
    if !trimmed.chars().all(is_ticker_char) {
        return Err(DataError::invalid_symbol(symbol, "symbol contains illegal characters"));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Decode a chart endpoint body into a cleaned series.
pub fn parse_chart(symbol: &str, body: &str) -> Result<OhlcvSeries, DataError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| DataError::unavailable(symbol, format!("malformed response: {}", e)))?;

    if let Some(error) = response.chart.error {
        return Err(if error.code.eq_ignore_ascii_case("Not Found") {
            DataError::invalid_symbol(symbol, error.description)
        } else {
            DataError::unavailable(symbol, format!("{}: {}", error.code, error.description))
        });
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DataError::unavailable(symbol, "empty result"))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .unwrap_or_default();

    let field = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let bars = timestamps.iter().enumerate().filter_map(|(i, &ts)| {
        Some(OhlcvBar {
            timestamp: DateTime::<Utc>::from_timestamp(ts, 0)?,
            open: field(&quote.open, i)?,
            high: field(&quote.high, i)?,
            low: field(&quote.low, i)?,
            close: field(&quote.close, i)?,
            volume: field(&quote.volume, i)?,
        })
    });

    let series = OhlcvSeries::from_bars(symbol, bars);
    if series.is_empty() {
        return Err(DataError::unavailable(symbol, "no complete bars returned"));
    }
    if series.len() < timestamps.len() {
        debug!(symbol, requested = timestamps.len(), kept = series.len(), "removed bars with missing values");
    }

    Ok(series)
}
