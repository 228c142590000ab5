//! Live tests against the Yahoo Finance chart endpoint.
//!
//! Note: These tests require network access and are ignored by default.
//! Run with `cargo test -p market_data -- --ignored`.

use market_data::{DataError, Period, YahooClient};

#[tokio::test]
#[ignore = "requires network access"]
async fn test_fetch_spy_one_month() {
    let client = YahooClient::new().unwrap();
    let series = client.fetch("SPY", Period::OneMonth).await.unwrap();

    assert!(!series.is_empty());
    assert_eq!(series.symbol(), "SPY");
    assert!(series.iter().all(|b| b.is_complete()));
    assert!(series.bars().windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_fetch_unknown_symbol() {
    let client = YahooClient::new().unwrap();
    let err = client
        .fetch("NOSUCHTICKERXYZ123", Period::OneMonth)
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::InvalidSymbol { .. }));
}
