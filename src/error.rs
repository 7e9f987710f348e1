//! Error types surfaced to HTTP clients and at startup.

use crate::{models::ErrorResponse, services::prediction::TableError};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Errors that terminate a request.
///
/// The `Display` text of each variant is exactly what the client receives
/// in the `error` field of the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required parameters: latitude and longitude")]
    MissingCoordinates,

    #[error("Invalid coordinates format. Latitude and longitude must be numeric.")]
    InvalidCoordinateFormat,

    #[error(
        "Coordinates out of range. Latitude must be between -90 and 90, longitude between -180 and 180."
    )]
    CoordinatesOutOfRange,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Failed to fetch weather data. Please try again later.")]
    WeatherUnavailable,

    #[error("Failed to process weather data. Please try again later.")]
    WeatherProcessing,

    /// A shared component was not registered on the app
    #[error("Internal server error")]
    MissingComponent(&'static str),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCoordinates
            | ApiError::InvalidCoordinateFormat
            | ApiError::CoordinatesOutOfRange => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::WeatherUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::WeatherProcessing | ApiError::MissingComponent(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Errors that prevent the service from booting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build weather HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("invalid disaster bucket table: {0}")]
    BucketTable(#[from] TableError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingCoordinates.status_code(), 400);
        assert_eq!(ApiError::InvalidCoordinateFormat.status_code(), 400);
        assert_eq!(ApiError::CoordinatesOutOfRange.status_code(), 400);
        assert_eq!(ApiError::RateLimited.status_code(), 429);
        assert_eq!(ApiError::WeatherUnavailable.status_code(), 503);
        assert_eq!(ApiError::WeatherProcessing.status_code(), 500);
        assert_eq!(ApiError::MissingComponent("weather").status_code(), 500);
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let response = ApiError::WeatherUnavailable.error_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Failed to fetch weather data. Please try again later."})
        );
    }
}
