use std::sync::Arc;

use market_client::{MarketDataError, MarketPrice, MeterReading, PriceWindow};

use crate::transform::{self, HOURS_PER_DAY, READINGS_PER_DAY};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("expected {expected} meter readings, got {actual}")]
    ReadingCount { expected: usize, actual: usize },
    #[error("market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

impl PipelineError {
    /// Label used for the `reason` dimension of rejection metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::ReadingCount { .. } => "reading_count",
            Self::MarketData(_) => "market_data",
        }
    }
}

/// Where hourly prices for a window come from.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn prices(&self, window: PriceWindow) -> Result<Vec<MarketPrice>, MarketDataError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub window: PriceWindow,
    pub hours_costed: usize,
    pub total_cost: f64,
}

/// Window covered by a day of readings: first sample to the 25th sample.
pub fn day_window(readings: &[MeterReading]) -> Result<PriceWindow, PipelineError> {
    if readings.len() != READINGS_PER_DAY {
        return Err(PipelineError::ReadingCount {
            expected: READINGS_PER_DAY,
            actual: readings.len(),
        });
    }

    Ok(PriceWindow::new(
        readings[0].timestamp,
        readings[READINGS_PER_DAY - 1].timestamp,
    ))
}

/// Readings in, total cost out. Holds no per-request state, so one instance
/// is shared by every request.
#[derive(Clone)]
pub struct CostPipeline {
    prices: Arc<dyn PriceSource>,
}

impl CostPipeline {
    pub fn new(prices: Arc<dyn PriceSource>) -> Self {
        Self { prices }
    }

    pub async fn run(&self, readings: &[MeterReading]) -> Result<CostBreakdown, PipelineError> {
        let window = day_window(readings)?;

        let prices = self.prices.prices(window).await?;
        if prices.len() != HOURS_PER_DAY {
            tracing::warn!(
                %window,
                records = prices.len(),
                expected = HOURS_PER_DAY,
                "market price count does not match hours in day"
            );
        }

        let consumption = transform::hourly_consumption(readings)?;
        let total = transform::aggregate_cost(&consumption, &prices);

        metrics::histogram!("energy_cost_total").record(total.total_cost);
        tracing::info!(
            %window,
            hours_costed = total.hours_costed,
            total_cost = total.total_cost,
            "energy cost computed"
        );

        Ok(CostBreakdown {
            window,
            hours_costed: total.hours_costed,
            total_cost: total.total_cost,
        })
    }
}
