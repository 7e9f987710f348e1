//! API request and response models.

use crate::models::{Coordinates, DisasterPrediction, WeatherSnapshot};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "Mock Disaster Prediction API";

pub const DISCLAIMER: &str =
    "This is a mock prediction for testing purposes only. Not for actual disaster response.";

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response model for the prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct PredictionResponse {
    pub location: Coordinates,
    pub weather_snapshot: WeatherSnapshot,
    pub disaster_prediction: DisasterPrediction,
    pub disclaimer: String,
}

impl PredictionResponse {
    pub fn new(
        location: Coordinates,
        weather_snapshot: WeatherSnapshot,
        disaster_prediction: DisasterPrediction,
    ) -> Self {
        Self {
            location,
            weather_snapshot,
            disaster_prediction,
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}
