use std::{fs::File, io::Read, path::Path};

use csv::StringRecord;
use market_client::MeterReading;
use time::OffsetDateTime;

use crate::pipeline::PipelineError;

/// Read meter readings from CSV.
///
/// Expected header columns (by name):
/// - timestamp (integer milliseconds since epoch, or RFC3339)
/// - reading (cumulative kWh)
pub fn read_readings_file<P: AsRef<Path>>(path: P) -> Result<Vec<MeterReading>, PipelineError> {
    let file = File::open(path.as_ref())
        .map_err(|e| PipelineError::InvalidInput(format!("failed to open CSV file: {e}")))?;
    read_readings(file)
}

pub fn read_readings<R: Read>(reader: R) -> Result<Vec<MeterReading>, PipelineError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| PipelineError::InvalidInput(format!("failed to read CSV headers: {e}")))?
        .clone();

    let mut readings = Vec::new();
    for result in rdr.records() {
        let record = result
            .map_err(|e| PipelineError::InvalidInput(format!("failed to read CSV record: {e}")))?;
        readings.push(record_to_reading(&record, &headers)?);
    }

    Ok(readings)
}

fn parse_timestamp_ms(s: &str) -> Result<i64, PipelineError> {
    let s = s.trim();
    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }

    let ts = OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
        .map_err(|e| PipelineError::InvalidInput(format!("invalid timestamp '{s}': {e}")))?;
    i64::try_from(ts.unix_timestamp_nanos() / 1_000_000)
        .map_err(|_| PipelineError::InvalidInput(format!("timestamp '{s}' out of range")))
}

fn record_to_reading(record: &StringRecord, headers: &StringRecord) -> Result<MeterReading, PipelineError> {
    let get = |name: &str| -> Result<&str, PipelineError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .and_then(|idx| record.get(idx))
            .ok_or_else(|| PipelineError::InvalidInput(format!("missing column '{name}' in CSV record")))
    };

    let timestamp = parse_timestamp_ms(get("timestamp")?)?;

    let reading_str = get("reading")?;
    let reading: f64 = reading_str
        .trim()
        .parse()
        .map_err(|e| PipelineError::InvalidInput(format!("invalid reading '{reading_str}': {e}")))?;

    Ok(MeterReading { timestamp, reading })
}
