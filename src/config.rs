use anyhow::Result;
use market_data::yahoo::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use market_data::{ClientConfig, Interval, Period, YahooClient};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Where to download history from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Ticker to download
    pub symbol: String,
    pub period: Period,
    pub interval: Interval,
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            symbol: "SPY".to_string(),
            period: Period::FiveYears,
            interval: Interval::Daily,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// How fetched history is cut into model inputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Number of past values in each feature window
    pub lookback: usize,
    /// Share of windows held out for evaluation, in (0, 1)
    pub test_fraction: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            lookback: 60,
            test_fraction: 0.2,
        }
    }
}

/// Top-level settings, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub evaluation: EvaluationConfig,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.data.symbol.trim().is_empty() {
            anyhow::bail!("symbol must not be empty");
        }

        if self.data.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }

        if self.data.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        if self.evaluation.lookback == 0 {
            anyhow::bail!("lookback must be greater than 0");
        }

        if !(self.evaluation.test_fraction > 0.0 && self.evaluation.test_fraction < 1.0) {
            anyhow::bail!(
                "test_fraction must be in range (0, 1), got {}",
                self.evaluation.test_fraction
            );
        }

        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.data.base_url.clone(),
            timeout: Duration::from_secs(self.data.timeout_secs),
            user_agent: self.data.user_agent.clone(),
        }
    }

    /// Build a chart client from the `[data]` section.
    pub fn client(&self) -> Result<YahooClient> {
        Ok(YahooClient::with_config(self.client_config())?)
    }
}
