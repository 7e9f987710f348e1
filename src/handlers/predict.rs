//! Disaster prediction endpoint handler.

use crate::{
    error::ApiError,
    middleware::RequestId,
    models::{Coordinates, PredictionRequest, PredictionResponse},
    services::{
        AppMetrics, DisasterBucketTable, SimpleRateLimiter, WeatherService, derive_key,
        enforce_rate_limit, normalize,
    },
};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, Result, dev::Payload, web};
use paperclip::{
    actix::{OperationModifier, api_v2_operation},
    v2::{
        models::{DefaultOperationRaw, DefaultSchemaRaw},
        schema::Apiv2Schema,
    },
};
use serde_json::Value;
use std::{collections::BTreeMap, future::Future, pin::Pin};

/// Prediction request body, decoded leniently.
///
/// Holds `None` when the body is missing, is not sent as JSON, or is not
/// valid JSON, so the handler can answer with its own validation error
/// instead of the framework's default.
pub struct PredictionBody(pub Option<Value>);

impl FromRequest for PredictionBody {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if !has_json_content_type(req) {
            return Box::pin(async { Ok(PredictionBody(None)) });
        }

        let bytes = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let bytes = bytes.await?;
            Ok(PredictionBody(serde_json::from_slice(&bytes).ok()))
        })
    }
}

/// `application/json` or any `application/*+json` media type
fn has_json_content_type(req: &HttpRequest) -> bool {
    let content_type = req.content_type().to_ascii_lowercase();
    content_type == "application/json"
        || (content_type.starts_with("application/") && content_type.ends_with("+json"))
}

impl Apiv2Schema for PredictionBody {}

// Documented as a JSON `PredictionRequest` body.
impl OperationModifier for PredictionBody {
    fn update_parameter(op: &mut DefaultOperationRaw) {
        web::Json::<PredictionRequest>::update_parameter(op);
    }

    fn update_definitions(map: &mut BTreeMap<String, DefaultSchemaRaw>) {
        web::Json::<PredictionRequest>::update_definitions(map);
    }
}

/// Look up a component registered with `App::app_data`
fn component<'a, T: 'static>(
    req: &'a HttpRequest,
    name: &'static str,
) -> Result<&'a web::Data<T>, ApiError> {
    req.app_data::<web::Data<T>>().ok_or_else(|| {
        tracing::error!(component = name, "Required component is not registered");
        ApiError::MissingComponent(name)
    })
}

/// Disaster prediction endpoint
///
/// Validates the coordinates, fetches current weather for them, and maps
/// the normalized observation to a mock disaster prediction. Each stage
/// either succeeds or ends the request with a single error object.
#[api_v2_operation(
    summary = "Mock Disaster Prediction",
    description = "Returns a deterministic mock disaster prediction derived from the current weather at the given coordinates. Not for actual disaster response.",
    tags("Prediction"),
    responses(
        (status = 200, description = "Prediction generated", body = PredictionResponse),
        (status = 400, description = "Missing, non-numeric or out-of-range coordinates"),
        (status = 429, description = "Too Many Requests"),
        (status = 500, description = "Weather data could not be processed"),
        (status = 503, description = "Weather provider unavailable")
    )
)]
pub async fn predict_disaster(
    req: HttpRequest,
    body: PredictionBody,
) -> Result<web::Json<PredictionResponse>, Error> {
    if let Some(limiter) = req.app_data::<web::Data<SimpleRateLimiter>>() {
        enforce_rate_limit(&req, limiter)?;
    }

    let coordinates = Coordinates::from_body(body.0.as_ref())?;

    let weather = component::<WeatherService>(&req, "weather_service")?;
    let buckets = component::<DisasterBucketTable>(&req, "bucket_table")?;
    let metrics = req.app_data::<web::Data<AppMetrics>>();

    let payload = match weather
        .fetch(coordinates.latitude, coordinates.longitude)
        .await
    {
        Ok(payload) => {
            if let Some(metrics) = metrics {
                metrics.record_weather_fetch("success");
            }
            payload
        }
        Err(err) => {
            if let Some(metrics) = metrics {
                metrics.record_weather_fetch(err.kind());
            }
            return Err(ApiError::WeatherUnavailable.into());
        }
    };

    let snapshot = normalize(&payload).map_err(|err| {
        tracing::error!(error = %err, "Error parsing weather data");
        ApiError::WeatherProcessing
    })?;

    let key = derive_key(&snapshot);
    let prediction = buckets.bucket(key.as_str());

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    tracing::info!(
        request_id = %request_id,
        latitude = coordinates.latitude,
        longitude = coordinates.longitude,
        key_prefix = key.as_str().get(..8).unwrap_or_default(),
        disaster_type = %prediction.disaster_type,
        risk_level = %prediction.risk_level,
        "Prediction generated"
    );

    if let Some(metrics) = metrics {
        metrics.record_prediction(&prediction.disaster_type);
    }

    Ok(web::Json(PredictionResponse::new(
        coordinates,
        snapshot,
        prediction,
    )))
}
