//! CSV loading for the synthetic crisis dataset.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OpsError, Result};

/// One row of the crisis dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    pub date: String,
    pub origin_airport: String,
    pub destination_airport: String,
    pub aircraft_type: String,
    pub scheduled_departure_hour: u32,
    pub delay_minutes: f64,
    pub pilots_required: u32,
    pub pilots_available: u32,
    pub avg_duty_hours: f64,
    pub rest_violation_flag: u8,
    pub weather_severity: f64,
    pub holiday_flag: u8,
    /// Binary label: 1 = cancelled, 0 = flew.
    pub cancelled: u8,
}

/// Loads all records from a CSV file. Fails on a missing file, a
/// malformed row, or an empty dataset.
pub fn load_records(path: &Path) -> Result<Vec<FlightRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: FlightRecord = row?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(OpsError::dataset(format!(
            "no rows in dataset: {}",
            path.display()
        )));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "date,origin_airport,destination_airport,aircraft_type,\
scheduled_departure_hour,delay_minutes,pilots_required,pilots_available,\
avg_duty_hours,rest_violation_flag,weather_severity,holiday_flag,cancelled";

    #[test]
    fn test_load_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "2024-01-01,DEL,BOM,A320,6,12.5,2,2,8.5,0,0.3,0,0").unwrap();
        writeln!(file, "2024-01-01,BLR,DEL,A321,18,45.0,2,0,10.2,1,0.7,1,1").unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].origin_airport, "DEL");
        assert_eq!(records[1].cancelled, 1);
        assert!((records[1].avg_duty_hours - 10.2).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_records(Path::new("/nonexistent/flights.csv"));
        assert!(matches!(result, Err(OpsError::Dataset(_))));
    }

    #[test]
    fn test_empty_dataset_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();

        let result = load_records(&path);
        assert!(matches!(result, Err(OpsError::Dataset(_))));
    }
}
