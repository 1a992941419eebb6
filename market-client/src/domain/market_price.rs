use serde::{Deserialize, Serialize};

/// One hourly day-ahead price as published by the market-data API.
///
/// `price` is per MWh; the wire name is `marketprice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    #[serde(rename = "marketprice")]
    pub price: f64,
    pub unit: String,
}

/// Millisecond bounds of the interval to fetch prices for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl PriceWindow {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }
}

impl std::fmt::Display for PriceWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_ms, self.end_ms)
    }
}
