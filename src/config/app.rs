//! Top-level application configuration.

use crate::{
    config::{MetricsConfig, RateLimitConfig, WeatherConfig},
    telemetry::LogFormat,
};
use std::env;

/// Process-wide configuration, read once at startup and passed explicitly
/// to the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub weather: WeatherConfig,
    pub rate_limit: RateLimitConfig,
    pub metrics: MetricsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_format: LogFormat::Pretty,
            weather: WeatherConfig::default(),
            rate_limit: RateLimitConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("HOST")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let log_format = env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.log_format);

        Self {
            host,
            port,
            log_format,
            weather: WeatherConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            metrics: MetricsConfig::from_env(),
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
