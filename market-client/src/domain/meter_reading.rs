use serde::{Deserialize, Serialize};

/// A cumulative meter sample.
///
/// `timestamp` is milliseconds since the Unix epoch, `reading` is the
/// cumulative register value in kWh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    pub timestamp: i64,
    pub reading: f64,
}
