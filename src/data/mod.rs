//! Core data models for Weather Vault
//!
//! This module contains the query type accepted by the ingestion endpoint,
//! the artifact returned by the archive API, and the deterministic file name
//! under which an artifact is stored.

pub mod validate;
pub mod weather;

pub use validate::{ValidationError, WeatherRequest};
pub use weather::{ArchiveClient, WeatherError};

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Timezone sent to the archive API when the request does not name one
pub const DEFAULT_TIMEZONE: &str = "auto";

/// Date format used for request fields, query parameters and file names
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated request for historical weather data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherQuery {
    /// Latitude in degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180]
    pub longitude: f64,
    /// First day of the range (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive), never before `start_date`
    pub end_date: NaiveDate,
    /// Timezone passed through to the archive API
    pub timezone: String,
}

impl WeatherQuery {
    /// Returns the name under which the artifact for this query is stored.
    ///
    /// The name depends only on the coordinates and the date range, so
    /// re-ingesting the same query overwrites the same object.
    pub fn file_key(&self) -> FileKey {
        FileKey(format!(
            "weather_{}_{}_{}_{}.json",
            format_coordinate(self.latitude),
            format_coordinate(self.longitude),
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT),
        ))
    }
}

/// Renders a coordinate in shortest round-trip form, keeping a trailing `.0`
/// on integral values (`-74.0`, `40.7`).
fn format_coordinate(value: f64) -> String {
    format!("{:?}", value)
}

/// Name of a stored weather artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FileKey(String);

impl FileKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw JSON payload returned by the archive API, stored verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherArtifact {
    /// Response body exactly as received
    pub body: Vec<u8>,
}

impl WeatherArtifact {
    /// Content type recorded on the stored object
    pub const CONTENT_TYPE: &'static str = "application/json";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(latitude: f64, longitude: f64, start: &str, end: &str) -> WeatherQuery {
        WeatherQuery {
            latitude,
            longitude,
            start_date: NaiveDate::parse_from_str(start, DATE_FORMAT).unwrap(),
            end_date: NaiveDate::parse_from_str(end, DATE_FORMAT).unwrap(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }

    #[test]
    fn test_file_key_format() {
        let key = query(40.7, -74.0, "2023-01-01", "2023-01-02").file_key();
        assert_eq!(key.as_str(), "weather_40.7_-74.0_2023-01-01_2023-01-02.json");
    }

    #[test]
    fn test_file_key_is_deterministic() {
        let first = query(51.5074, -0.1278, "2022-06-01", "2022-06-30").file_key();
        let second = query(51.5074, -0.1278, "2022-06-01", "2022-06-30").file_key();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_key_ignores_timezone() {
        let mut with_tz = query(10.0, 20.0, "2023-03-01", "2023-03-01");
        with_tz.timezone = "Europe/Berlin".to_string();
        let without_tz = query(10.0, 20.0, "2023-03-01", "2023-03-01");
        assert_eq!(with_tz.file_key(), without_tz.file_key());
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(0.0), "0.0");
        assert_eq!(format_coordinate(-90.0), "-90.0");
        assert_eq!(format_coordinate(180.0), "180.0");
        assert_eq!(format_coordinate(49.2743), "49.2743");
        assert_eq!(format_coordinate(-123.1544), "-123.1544");
    }

    #[test]
    fn test_file_key_serializes_as_string() {
        let key = query(1.5, 2.5, "2023-01-01", "2023-01-01").file_key();
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json, serde_json::json!("weather_1.5_2.5_2023-01-01_2023-01-01.json"));
    }
}
