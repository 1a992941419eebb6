use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use cost_service::{api, config::AppConfig, metrics_server, observability, pipeline::CostPipeline};
use market_client::MarketDataClient;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let client = MarketDataClient::new(&cfg.market_data.base_url, cfg.market_data.request_timeout())?;
    let pipeline = CostPipeline::new(Arc::new(client));
    let app = api::router(pipeline);

    let addr: SocketAddr = cfg
        .server
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.bind_addr: {e}"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        market_data = %cfg.market_data.base_url,
        "energy cost service listening"
    );
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
