use std::{env, sync::Arc};

use anyhow::{bail, Result};
use cost_service::{config::AppConfig, observability, pipeline::CostPipeline, sources};
use market_client::MarketDataClient;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: energy_cost_from_csv <readings_csv_path>");
    }
    let file_path = &args[1];

    // Same config file as the service; only [market_data] is used here.
    let cfg = AppConfig::load()?;

    let readings = sources::read_readings_file(file_path)?;
    let client = MarketDataClient::new(&cfg.market_data.base_url, cfg.market_data.request_timeout())?;
    let pipeline = CostPipeline::new(Arc::new(client));

    let breakdown = pipeline.run(&readings).await?;

    println!("{}", breakdown.total_cost);
    Ok(())
}
