use crate::{error::AquaError, risk, series};
use aquaguard_schemas::{reading::Reading, risk::RiskTier};
use chrono::{DateTime, Utc};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Serialize, Deserialize)]
struct LogEntry {
    timestamp: DateTime<Utc>,
    ph: f64,
    temperature: f64,
    ammonia: f64,
    tier: RiskTier,
}

/// Appends every reading of a session to a CSV file.
pub struct ReadingLogger {
    writer: Writer<fs::File>,
    path: String,
}

impl ReadingLogger {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AquaError> {
        let path = path.as_ref().display().to_string();
        let writer = Writer::from_path(&path).map_err(|e| AquaError::CsvError(path.clone(), e))?;
        Ok(Self { writer, path })
    }

    pub fn log_reading(&mut self, reading: &Reading) -> Result<(), AquaError> {
        let entry = LogEntry {
            timestamp: reading.timestamp,
            ph: reading.ph,
            temperature: reading.temperature,
            ammonia: reading.ammonia,
            tier: risk::classify(reading.ammonia),
        };

        self.writer
            .serialize(entry)
            .map_err(|e| AquaError::CsvError(self.path.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| AquaError::FileIO(self.path.clone(), e))?;
        Ok(())
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Reads a log written by `ReadingLogger` back into readings, in file order.
///
/// Every row must hold a valid reading; the first one that does not is
/// reported with its line number.
pub fn read_history<P: AsRef<Path>>(path: P) -> Result<Vec<Reading>, AquaError> {
    let path = path.as_ref().display().to_string();
    let mut reader = csv::Reader::from_path(&path).map_err(|e| AquaError::CsvError(path.clone(), e))?;

    let mut readings = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let entry: LogEntry = result.map_err(|e| AquaError::CsvError(path.clone(), e))?;
        let reading = Reading::new(entry.timestamp, entry.ph, entry.temperature, entry.ammonia);
        // Line 1 is the header.
        series::check_reading(&reading)
            .map_err(|e| AquaError::InvalidLogRecord(path.clone(), i + 2, Box::new(e)))?;
        readings.push(reading);
    }
    Ok(readings)
}
