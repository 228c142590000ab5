use anyhow::Result;
use market_data::OhlcvSeries;
use tracing::debug;

/// Fixed-length feature windows and the value that follows each one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Windows {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl Windows {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Length of each feature window.
    pub fn lookback(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }
}

/// Chronological train/test split of a window set.
#[derive(Debug, Clone)]
pub struct WindowSplit {
    pub train: Windows,
    pub test: Windows,
}

/// Cut `values` into overlapping windows.
///
/// For every `t` in `lookback..values.len()` the feature is
/// `values[t - lookback..t]` and the target is `values[t]`.
pub fn make_windows(values: &[f64], lookback: usize) -> Result<Windows> {
    if lookback == 0 {
        anyhow::bail!("lookback must be greater than 0");
    }
    if values.len() <= lookback {
        anyhow::bail!(
            "Insufficient data: need more than {} values, got {}",
            lookback,
            values.len()
        );
    }

    let features = values.windows(lookback + 1).map(|w| w[..lookback].to_vec()).collect();
    let targets = values[lookback..].to_vec();

    Ok(Windows { features, targets })
}

/// Windows over the closing prices of a fetched series.
pub fn close_windows(series: &OhlcvSeries, lookback: usize) -> Result<Windows> {
    make_windows(&series.closes(), lookback)
}

/// Minimum size of the held-out set; the naive baseline needs two values.
pub const MIN_TEST_WINDOWS: usize = 2;

/// Hold out the trailing `ceil(n * test_fraction)` windows for testing.
///
/// The test set keeps at least [`MIN_TEST_WINDOWS`] windows and the
/// training set at least one; order is preserved so the test set always
/// lies after the training set in time.
pub fn split_train_test(windows: &Windows, test_fraction: f64) -> Result<WindowSplit> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        anyhow::bail!("test_fraction must be in range (0, 1), got {}", test_fraction);
    }

    let n = windows.len();
    if n < MIN_TEST_WINDOWS + 1 {
        anyhow::bail!(
            "Insufficient data: need at least {} windows to split, got {}",
            MIN_TEST_WINDOWS + 1,
            n
        );
    }

    let n_test = ((n as f64 * test_fraction).ceil() as usize).clamp(MIN_TEST_WINDOWS, n - 1);
    let n_train = n - n_test;
    debug!(n_train, n_test, "split windows");

    Ok(WindowSplit {
        train: Windows {
            features: windows.features[..n_train].to_vec(),
            targets: windows.targets[..n_train].to_vec(),
        },
        test: Windows {
            features: windows.features[n_train..].to_vec(),
            targets: windows.targets[n_train..].to_vec(),
        },
    })
}
