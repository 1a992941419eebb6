mod market_price;
mod meter_reading;

pub use market_price::{MarketPrice, PriceWindow};
pub use meter_reading::MeterReading;
