use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "cost_service=info,market_client=info";

/// `RUST_LOG` when set and valid, otherwise info for this service's crates.
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok())
}

fn filter_from(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .init();
}
