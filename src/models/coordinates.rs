//! Request coordinates and their validation.

use crate::error::ApiError;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Documented shape of the prediction request body
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct PredictionRequest {
    /// Latitude in degrees, -90 to 90
    pub latitude: f64,
    /// Longitude in degrees, -180 to 180
    pub longitude: f64,
}

/// Validated coordinates for a single request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validate a decoded request body.
    ///
    /// Checks run in a fixed order: key presence, numeric format, range.
    /// `None` stands for an absent or undecodable body.
    pub fn from_body(body: Option<&Value>) -> Result<Self, ApiError> {
        let fields = body
            .and_then(Value::as_object)
            .ok_or(ApiError::MissingCoordinates)?;

        let (Some(raw_latitude), Some(raw_longitude)) =
            (fields.get("latitude"), fields.get("longitude"))
        else {
            return Err(ApiError::MissingCoordinates);
        };

        let latitude = parse_number(raw_latitude).ok_or(ApiError::InvalidCoordinateFormat)?;
        let longitude = parse_number(raw_longitude).ok_or(ApiError::InvalidCoordinateFormat)?;

        // NaN fails both range checks.
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ApiError::CoordinatesOutOfRange);
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Accept JSON numbers and numeric strings such as `"12.5"`.
fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}
