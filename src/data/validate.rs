//! Validation of incoming store requests
//!
//! Turns the loosely typed JSON body of `POST /store-weather-data` into a
//! [`WeatherQuery`], reporting the first rule that fails.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::{WeatherQuery, DATE_FORMAT, DEFAULT_TIMEZONE};

const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Reasons a store request is rejected
///
/// The display strings are returned to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or null
    #[error("Invalid input: {0} is required")]
    Missing(&'static str),

    /// Latitude is not a number or lies outside [-90, 90]
    #[error("Invalid latitude: must be a number between -90 and 90")]
    Latitude,

    /// Longitude is not a number or lies outside [-180, 180]
    #[error("Invalid longitude: must be a number between -180 and 180")]
    Longitude,

    /// A date is not a `YYYY-MM-DD` calendar date
    #[error("Dates must be in YYYY-MM-DD format")]
    DateFormat,

    /// The range ends before it starts
    #[error("end_date cannot be before start_date")]
    DateOrder,

    /// Timezone was given but is not a string
    #[error("Invalid input: timezone must be a string")]
    Timezone,
}

/// Body of a store request before validation
///
/// Fields stay untyped so that numeric strings, wrong types and nulls reach
/// the validator instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub start_date: Option<Value>,
    #[serde(default)]
    pub end_date: Option<Value>,
    #[serde(default)]
    pub timezone: Option<Value>,
}

impl WeatherRequest {
    /// Validates the request and normalizes it into a [`WeatherQuery`].
    ///
    /// Rules are checked in order: required fields, latitude range,
    /// longitude range, date format, date order, timezone type.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<WeatherQuery, ValidationError> {
        let latitude = required(&self.latitude, "latitude")?;
        let longitude = required(&self.longitude, "longitude")?;
        let start_date = required(&self.start_date, "start_date")?;
        let end_date = required(&self.end_date, "end_date")?;

        let latitude =
            coordinate_in_range(latitude, LATITUDE_RANGE).ok_or(ValidationError::Latitude)?;
        let longitude =
            coordinate_in_range(longitude, LONGITUDE_RANGE).ok_or(ValidationError::Longitude)?;

        let start_date = parse_date(start_date).ok_or(ValidationError::DateFormat)?;
        let end_date = parse_date(end_date).ok_or(ValidationError::DateFormat)?;
        if end_date < start_date {
            return Err(ValidationError::DateOrder);
        }

        let timezone = match &self.timezone {
            None => DEFAULT_TIMEZONE.to_string(),
            Some(Value::String(tz)) => tz.clone(),
            Some(_) => return Err(ValidationError::Timezone),
        };

        Ok(WeatherQuery {
            latitude,
            longitude,
            start_date,
            end_date,
            timezone,
        })
    }
}

fn required<'a>(
    field: &'a Option<Value>,
    name: &'static str,
) -> Result<&'a Value, ValidationError> {
    field.as_ref().ok_or(ValidationError::Missing(name))
}

/// Accepts a JSON number or a numeric string and checks it against an
/// inclusive range.
fn coordinate_in_range(value: &Value, (min, max): (f64, f64)) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (parsed.is_finite() && (min..=max).contains(&parsed)).then_some(parsed)
}

/// Parses a strict `YYYY-MM-DD` date. chrono alone would also accept
/// unpadded months and days.
fn parse_date(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?;
    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}
