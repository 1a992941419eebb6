pub mod api;
pub mod config;
pub mod metrics_server;
pub mod observability;
pub mod pipeline;
pub mod sources;
pub mod transform;

#[cfg(test)]
mod test_util;

pub use pipeline::{CostBreakdown, CostPipeline, PipelineError, PriceSource};
