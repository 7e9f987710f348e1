//! Weather provider client and payload normalization.

use crate::{
    config::WeatherConfig,
    models::{Reading, WeatherSnapshot},
};
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

type Object = Map<String, Value>;

/// Errors that can occur while fetching from the weather provider
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid weather provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("weather request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("weather provider returned status {0}")]
    Status(u16),

    #[error("weather payload is not valid JSON: {0}")]
    Decode(reqwest::Error),

    #[error("weather provider returned an empty payload")]
    EmptyPayload,
}

impl WeatherError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_decode() {
            WeatherError::Decode(err)
        } else {
            WeatherError::Network(err)
        }
    }

    /// Short error class used in logs and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::InvalidUrl(_) => "invalid_url",
            WeatherError::Timeout => "timeout",
            WeatherError::Network(_) => "network_error",
            WeatherError::Status(_) => "http_status",
            WeatherError::Decode(_) => "decode_error",
            WeatherError::EmptyPayload => "empty_payload",
        }
    }
}

/// Client for the OpenWeatherMap current-weather endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct WeatherService {
    client: Client,
    config: WeatherConfig,
}

impl WeatherService {
    pub fn new(config: WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("disaster-prediction-api/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the raw current-weather payload for a location.
    ///
    /// Single attempt, no retry. Fails on transport errors, timeouts,
    /// non-2xx statuses and bodies that are not JSON.
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<Value, WeatherError> {
        let result = self.fetch_once(lat, lon).await;

        if let Err(err) = &result {
            error!(
                destination = %self.destination(),
                error_kind = err.kind(),
                error = %err,
                "Error fetching weather data"
            );
        }

        result
    }

    async fn fetch_once(&self, lat: f64, lon: f64) -> Result<Value, WeatherError> {
        let url = self.weather_url(lat, lon)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(WeatherError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let payload: Value = response.json().await.map_err(WeatherError::from_reqwest)?;
        if is_empty_payload(&payload) {
            return Err(WeatherError::EmptyPayload);
        }

        debug!(destination = %self.destination(), "Weather data received");
        Ok(payload)
    }

    fn weather_url(&self, lat: f64, lon: f64) -> Result<Url, url::ParseError> {
        let endpoint = format!("{}/weather", self.config.base_url.trim_end_matches('/'));
        Url::parse_with_params(
            &endpoint,
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.config.api_key.clone()),
                ("units", "metric".to_string()),
            ],
        )
    }

    /// Provider host, for logging without exposing the API key
    fn destination(&self) -> String {
        Url::parse(&self.config.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "invalid_url".to_string())
    }
}

/// `null`, `{}` and `[]` carry no observation at all.
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Ways a provider payload can fail to match the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("expected `{0}` to be a JSON object")]
    NotAnObject(&'static str),

    #[error("expected `{0}` to be a JSON array")]
    NotAnArray(&'static str),

    #[error("`weather` array is empty")]
    NoConditions,

    #[error("field `{section}.{field}` has an unexpected type")]
    InvalidField {
        section: &'static str,
        field: &'static str,
    },
}

/// Extract a [`WeatherSnapshot`] from a raw provider payload.
///
/// Absent sections and fields fall back to integer zero, or to `"unknown"`
/// for the description. Numbers pass through in the form the provider sent
/// them; only temperature decimals are rounded. Present values that are not
/// numbers (including `null`) are structural errors.
pub fn normalize(payload: &Value) -> Result<WeatherSnapshot, NormalizeError> {
    let root = payload
        .as_object()
        .ok_or(NormalizeError::NotAnObject("payload"))?;

    let main = section(root, "main")?;
    let wind = section(root, "wind")?;
    let clouds = section(root, "clouds")?;

    let temperature = reading_field(main, "main", "temp")?.rounded_to_tenths();
    let humidity = reading_field(main, "main", "humidity")?;
    let pressure = reading_field(main, "main", "pressure")?;
    let wind_speed = reading_field(wind, "wind", "speed")?;
    let cloud_coverage = reading_field(clouds, "clouds", "all")?;
    let description = description(root)?;

    Ok(WeatherSnapshot {
        temperature,
        humidity,
        wind_speed,
        pressure,
        cloud_coverage,
        description,
    })
}

fn section<'a>(root: &'a Object, name: &'static str) -> Result<Option<&'a Object>, NormalizeError> {
    match root.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_object()
            .map(Some)
            .ok_or(NormalizeError::NotAnObject(name)),
    }
}

fn reading_field(
    section: Option<&Object>,
    section_name: &'static str,
    field: &'static str,
) -> Result<Reading, NormalizeError> {
    match section.and_then(|s| s.get(field)) {
        None => Ok(Reading::ZERO),
        Some(value) => value
            .as_number()
            .and_then(Reading::from_number)
            .ok_or(NormalizeError::InvalidField {
                section: section_name,
                field,
            }),
    }
}

fn description(root: &Object) -> Result<String, NormalizeError> {
    let conditions = match root.get("weather") {
        None => return Ok("unknown".to_string()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(NormalizeError::NotAnArray("weather")),
    };

    let first = conditions
        .first()
        .ok_or(NormalizeError::NoConditions)?
        .as_object()
        .ok_or(NormalizeError::NotAnObject("weather[0]"))?;

    match first.get("description") {
        None => Ok("unknown".to_string()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(NormalizeError::InvalidField {
            section: "weather[0]",
            field: "description",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(base_url: &str) -> WeatherService {
        WeatherService::new(WeatherConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            ..WeatherConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_normalize_full_payload() {
        let payload = json!({
            "weather": [{"main": "Clear", "description": "clear sky"}],
            "main": {"temp": 23.46, "humidity": 60, "pressure": 1012},
            "wind": {"speed": 3.2},
            "clouds": {"all": 40},
            "name": "Somewhere"
        });

        let snapshot = normalize(&payload).unwrap();
        assert_eq!(
            snapshot,
            WeatherSnapshot {
                temperature: Reading::Decimal(23.5),
                humidity: Reading::Integer(60),
                wind_speed: Reading::Decimal(3.2),
                pressure: Reading::Integer(1012),
                cloud_coverage: Reading::Integer(40),
                description: "clear sky".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_defaults_missing_fields() {
        let snapshot = normalize(&json!({"main": {}})).unwrap();
        assert_eq!(snapshot.temperature, Reading::ZERO);
        assert_eq!(snapshot.humidity, Reading::ZERO);
        assert_eq!(snapshot.wind_speed, Reading::ZERO);
        assert_eq!(snapshot.pressure, Reading::ZERO);
        assert_eq!(snapshot.cloud_coverage, Reading::ZERO);
        assert_eq!(snapshot.description, "unknown");

        let snapshot = normalize(&json!({"weather": [{}]})).unwrap();
        assert_eq!(snapshot.description, "unknown");
    }

    #[test]
    fn test_normalize_wind_speed_is_not_rounded() {
        let snapshot = normalize(&json!({"wind": {"speed": 3.257}})).unwrap();
        assert_eq!(snapshot.wind_speed, Reading::Decimal(3.257));
    }

    #[test]
    fn test_normalize_keeps_number_kinds() {
        let snapshot = normalize(&json!({
            "main": {"temp": 20, "humidity": 60.5, "pressure": 1012.0},
            "wind": {"speed": 3},
            "clouds": {"all": 12.5}
        }))
        .unwrap();

        assert_eq!(snapshot.temperature, Reading::Integer(20));
        assert_eq!(snapshot.humidity, Reading::Decimal(60.5));
        assert_eq!(snapshot.pressure, Reading::Decimal(1012.0));
        assert_eq!(snapshot.wind_speed, Reading::Integer(3));
        assert_eq!(snapshot.cloud_coverage, Reading::Decimal(12.5));
    }

    #[test]
    fn test_normalize_rejects_malformed_payloads() {
        assert_eq!(
            normalize(&json!([1, 2, 3])),
            Err(NormalizeError::NotAnObject("payload"))
        );
        assert_eq!(
            normalize(&json!({"main": "hot"})),
            Err(NormalizeError::NotAnObject("main"))
        );
        assert_eq!(
            normalize(&json!({"weather": []})),
            Err(NormalizeError::NoConditions)
        );
        assert_eq!(
            normalize(&json!({"weather": {"description": "rain"}})),
            Err(NormalizeError::NotAnArray("weather"))
        );
        assert_eq!(
            normalize(&json!({"main": {"temp": null}})),
            Err(NormalizeError::InvalidField {
                section: "main",
                field: "temp"
            })
        );
        assert_eq!(
            normalize(&json!({"main": {"humidity": "60"}})),
            Err(NormalizeError::InvalidField {
                section: "main",
                field: "humidity"
            })
        );
        assert_eq!(
            normalize(&json!({"clouds": {"all": [40]}})),
            Err(NormalizeError::InvalidField {
                section: "clouds",
                field: "all"
            })
        );
    }

    #[test]
    fn test_empty_payload_detection() {
        assert!(is_empty_payload(&json!(null)));
        assert!(is_empty_payload(&json!({})));
        assert!(is_empty_payload(&json!([])));
        assert!(!is_empty_payload(&json!({"main": {}})));
    }

    #[test]
    fn test_weather_url() {
        let service = service("https://api.test.com/data/2.5/");
        let url = service.weather_url(34.05, -118.25).unwrap();

        assert_eq!(url.host_str(), Some("api.test.com"));
        assert_eq!(url.path(), "/data/2.5/weather");
        assert_eq!(
            url.query(),
            Some("lat=34.05&lon=-118.25&appid=test-key&units=metric")
        );
    }

    #[test]
    fn test_destination() {
        assert_eq!(service("https://api.test.com/data").destination(), "api.test.com");
        assert_eq!(service("not a url").destination(), "invalid_url");
    }

    #[actix_web::test]
    async fn test_fetch_with_invalid_base_url() {
        let result = service("not a url").fetch(0.0, 0.0).await;
        assert!(matches!(result, Err(WeatherError::InvalidUrl(_))));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(WeatherError::Timeout.kind(), "timeout");
        assert_eq!(WeatherError::Status(502).kind(), "http_status");
        assert_eq!(WeatherError::EmptyPayload.kind(), "empty_payload");
    }
}
