pub mod api;
pub mod domain;

pub use api::market_data::{MarketDataClient, MarketDataError};
pub use domain::{MarketPrice, MeterReading, PriceWindow};
