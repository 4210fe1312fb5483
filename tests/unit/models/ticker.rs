//! Unit tests for ticker normalization

use crypto_analyst::models::{normalize_ticker, PRESET_TICKERS};

#[test]
fn test_preset_labels_are_kept_verbatim() {
    for preset in PRESET_TICKERS {
        assert_eq!(normalize_ticker(preset).as_deref(), Some(preset));
    }
}

#[test]
fn test_custom_tickers_are_trimmed_and_uppercased() {
    assert_eq!(normalize_ticker("  solusd ").as_deref(), Some("SOLUSD"));
    assert_eq!(normalize_ticker("doge").as_deref(), Some("DOGE"));
}

#[test]
fn test_blank_ticker_is_rejected() {
    assert_eq!(normalize_ticker(""), None);
    assert_eq!(normalize_ticker("   "), None);
}
