use market_client::{MarketPrice, MeterReading};

use crate::pipeline::PipelineError;

/// Cumulative samples bounding one day of hourly intervals.
pub const READINGS_PER_DAY: usize = 25;
pub const HOURS_PER_DAY: usize = READINGS_PER_DAY - 1;

/// Market prices are quoted per MWh, readings are in kWh.
const KWH_PER_MWH: f64 = 1000.0;

/// Result of pricing a day's consumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostTotal {
    pub total_cost: f64,
    pub hours_costed: usize,
}

/// Convert 25 cumulative readings into 24 hourly deltas.
///
/// Rules:
/// - Exactly `READINGS_PER_DAY` readings are required.
/// - Deltas are taken in the order given; a meter reset shows up as negative
///   consumption and is not corrected.
pub fn hourly_consumption(readings: &[MeterReading]) -> Result<[f64; HOURS_PER_DAY], PipelineError> {
    if readings.len() != READINGS_PER_DAY {
        return Err(PipelineError::ReadingCount {
            expected: READINGS_PER_DAY,
            actual: readings.len(),
        });
    }

    let mut consumption = [0.0; HOURS_PER_DAY];
    for (slot, pair) in consumption.iter_mut().zip(readings.windows(2)) {
        *slot = pair[1].reading - pair[0].reading;
    }

    Ok(consumption)
}

/// Price each hour by position: hour `i` is paired with `prices[i]`.
///
/// Only `min(HOURS_PER_DAY, prices.len())` hours are costed, so a short price
/// series yields a partial day and any surplus records are ignored.
pub fn aggregate_cost(consumption: &[f64; HOURS_PER_DAY], prices: &[MarketPrice]) -> CostTotal {
    let mut total_cost = 0.0;
    let mut hours_costed = 0;

    for (kwh, price) in consumption.iter().zip(prices) {
        total_cost += kwh * (price.price / KWH_PER_MWH);
        hours_costed += 1;
    }

    CostTotal {
        total_cost,
        hours_costed,
    }
}
