//! Normalized weather observation.

use paperclip::actix::Apiv2Schema;
use paperclip::v2::{models::DataType, schema::TypedData};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// A numeric reading kept in the form the provider sent it.
///
/// Integers stay integers and decimals stay decimals, both in the response
/// body and in the prediction key (`20` and `20.0` are different readings).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Integer(i64),
    Decimal(f64),
}

impl Reading {
    /// Reading for a missing field
    pub const ZERO: Reading = Reading::Integer(0);

    pub fn from_number(number: &Number) -> Option<Self> {
        match number.as_i64() {
            Some(value) => Some(Reading::Integer(value)),
            None => number.as_f64().map(Reading::Decimal),
        }
    }

    /// Round decimals to one place; integers are already exact.
    pub fn rounded_to_tenths(self) -> Self {
        match self {
            Reading::Integer(_) => self,
            Reading::Decimal(value) => Reading::Decimal(round_to_tenths(value)),
        }
    }
}

/// Decimals keep a fractional digit even when whole (`18.0`), integers
/// never get one (`18`).
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Integer(value) => write!(f, "{value}"),
            Reading::Decimal(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Reading::Decimal(value) => write!(f, "{value}"),
        }
    }
}

impl TypedData for Reading {
    fn data_type() -> DataType {
        DataType::Number
    }
}

/// Round to one decimal place using the decimal rendering of the value.
fn round_to_tenths(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Weather observation extracted from the provider payload.
///
/// Built fresh for every request and never modified afterwards. The field
/// order here is the order used when deriving the prediction key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct WeatherSnapshot {
    /// Air temperature in °C, decimals rounded to one place
    pub temperature: Reading,
    /// Relative humidity in percent
    pub humidity: Reading,
    /// Wind speed in m/s
    pub wind_speed: Reading,
    /// Atmospheric pressure in hPa
    pub pressure: Reading,
    /// Cloud coverage in percent
    pub cloud_coverage: Reading,
    /// Provider's condition text, e.g. "clear sky"
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reading_display_keeps_provider_form() {
        assert_eq!(Reading::Integer(20).to_string(), "20");
        assert_eq!(Reading::Integer(-3).to_string(), "-3");
        assert_eq!(Reading::Decimal(20.0).to_string(), "20.0");
        assert_eq!(Reading::Decimal(3.257).to_string(), "3.257");
        assert_eq!(Reading::ZERO.to_string(), "0");
    }

    #[test]
    fn test_reading_from_number() {
        let value = json!({"int": 60, "float": 60.5, "whole": 60.0});
        let reading = |key: &str| value[key].as_number().and_then(Reading::from_number);

        assert_eq!(reading("int"), Some(Reading::Integer(60)));
        assert_eq!(reading("float"), Some(Reading::Decimal(60.5)));
        assert_eq!(reading("whole"), Some(Reading::Decimal(60.0)));
    }

    #[test]
    fn test_rounding_only_touches_decimals() {
        assert_eq!(Reading::Integer(20).rounded_to_tenths(), Reading::Integer(20));
        assert_eq!(Reading::Decimal(23.46).rounded_to_tenths(), Reading::Decimal(23.5));
        assert_eq!(Reading::Decimal(17.96).rounded_to_tenths(), Reading::Decimal(18.0));
        assert_eq!(Reading::Decimal(-3.04).rounded_to_tenths(), Reading::Decimal(-3.0));
    }

    #[test]
    fn test_reading_serializes_as_plain_number() {
        assert_eq!(serde_json::to_value(Reading::Integer(59)).unwrap(), json!(59));
        assert_eq!(serde_json::to_value(Reading::Decimal(18.0)).unwrap(), json!(18.0));
        assert!(serde_json::to_value(Reading::Decimal(18.0)).unwrap().is_f64());
    }
}
