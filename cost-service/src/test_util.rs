use market_client::{MarketDataError, MarketPrice, MeterReading, PriceWindow};

use crate::pipeline::PriceSource;

const HOUR_MS: i64 = 3_600_000;
pub const DAY_START_MS: i64 = 1_704_063_600_000;

/// Asserts that two `f64` values are within `1e-9` of each other.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        assert!(
            (a - e).abs() < 1e-9,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Hourly readings starting at `DAY_START_MS`, one per cumulative value.
pub fn readings(values: &[f64]) -> Vec<MeterReading> {
    values
        .iter()
        .enumerate()
        .map(|(i, &reading)| MeterReading {
            timestamp: DAY_START_MS + i as i64 * HOUR_MS,
            reading,
        })
        .collect()
}

/// `count` readings increasing by `step` kWh per hour from zero.
pub fn linear_readings(count: usize, step: f64) -> Vec<MeterReading> {
    let values: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();
    readings(&values)
}

/// Hourly price records starting at `DAY_START_MS`.
pub fn prices(values: &[f64]) -> Vec<MarketPrice> {
    values
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let start = DAY_START_MS + i as i64 * HOUR_MS;
            MarketPrice {
                start_timestamp: start,
                end_timestamp: start + HOUR_MS,
                price,
                unit: "Eur/MWh".to_string(),
            }
        })
        .collect()
}

/// Price source that always answers with the same records and remembers the
/// last window it was asked for.
#[derive(Default)]
pub struct StaticPrices {
    pub records: Vec<MarketPrice>,
    pub last_window: std::sync::Mutex<Option<PriceWindow>>,
}

impl StaticPrices {
    pub fn new(records: Vec<MarketPrice>) -> Self {
        Self {
            records,
            last_window: std::sync::Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl PriceSource for StaticPrices {
    async fn prices(&self, window: PriceWindow) -> Result<Vec<MarketPrice>, MarketDataError> {
        *self.last_window.lock().unwrap() = Some(window);
        Ok(self.records.clone())
    }
}

/// Price source whose upstream never decodes.
pub struct UndecodablePrices;

#[async_trait::async_trait]
impl PriceSource for UndecodablePrices {
    async fn prices(&self, _window: PriceWindow) -> Result<Vec<MarketPrice>, MarketDataError> {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        Err(MarketDataError::Decode(err))
    }
}

/// One metric captured by `run_recording_metrics`.
#[derive(Debug)]
pub struct RecordedMetric {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: metrics_util::debugging::DebugValue,
}

impl RecordedMetric {
    pub fn has_label(&self, key: &str, value: &str) -> bool {
        self.labels.iter().any(|(k, v)| k == key && v == value)
    }
}

/// Drive `fut` on a current-thread runtime with a local debugging recorder
/// installed, returning its output and every metric it emitted.
pub fn run_recording_metrics<F: std::future::Future>(fut: F) -> (F::Output, Vec<RecordedMetric>) {
    let recorder = metrics_util::debugging::DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let output = metrics::with_local_recorder(&recorder, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(fut)
    });

    let recorded = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(composite, _, _, value)| {
            let key = composite.key();
            RecordedMetric {
                name: key.name().to_string(),
                labels: key
                    .labels()
                    .map(|l| (l.key().to_string(), l.value().to_string()))
                    .collect(),
                value,
            }
        })
        .collect();

    (output, recorded)
}
