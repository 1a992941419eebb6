pub mod market_prices;
pub mod readings_csv;

pub use readings_csv::{read_readings, read_readings_file};
