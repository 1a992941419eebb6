use std::time::Instant;

use market_client::{MarketDataClient, MarketDataError, MarketPrice, PriceWindow};

use crate::pipeline::PriceSource;

/// Live prices from the market-data API. One upstream call per request.
#[async_trait::async_trait]
impl PriceSource for MarketDataClient {
    async fn prices(&self, window: PriceWindow) -> Result<Vec<MarketPrice>, MarketDataError> {
        let started = Instant::now();
        let res = self.fetch_prices(window).await;
        metrics::histogram!("market_data_fetch_seconds").record(started.elapsed().as_secs_f64());

        if let Err(e) = &res {
            metrics::counter!("market_data_fetch_errors_total", "kind" => e.kind()).increment(1);
            tracing::error!(error = %e, %window, endpoint = %self.endpoint(), "market data fetch failed");
        }

        res
    }
}
