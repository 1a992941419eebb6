use std::{fs, io, path::Path, time::Duration};

use market_client::api::market_data::DEFAULT_BASE_URL;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub base_url: String,
    /// Unset means the upstream call may wait indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl MarketDataConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub market_data: MarketDataConfig,
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    /// Load from `COST_SERVICE_CONFIG` (default `cost-service.toml`). A missing
    /// file falls back to built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("COST_SERVICE_CONFIG").unwrap_or_else(|_| "cost-service.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }
}
