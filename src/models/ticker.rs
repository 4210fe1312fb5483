//! Preset tickers and custom ticker normalization

pub const PRESET_TICKERS: [&str; 7] = [
    "TOTAL (Crypto Total Market Cap)",
    "TOTAL3",
    "BTC.D",
    "ETHBTC",
    "BTCUSD",
    "ETHUSD",
    "USDT.D + USDC.D",
];

/// Preset labels are kept verbatim; custom input is trimmed and upper-cased.
/// Returns `None` for blank input.
pub fn normalize_ticker(input: &str) -> Option<String> {
    if let Some(preset) = PRESET_TICKERS.iter().find(|preset| **preset == input) {
        return Some(preset.to_string());
    }
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
