//! Weather provider configuration.

use std::{env, fmt, time::Duration};

/// Placeholder key used when `OPENWEATHER_API_KEY` is not set.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Connection settings for the OpenWeatherMap current-weather API
#[derive(Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    /// Upper bound on the whole outbound request, body included
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 5,
            connect_timeout_seconds: 3,
        }
    }
}

impl WeatherConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_key);

        let base_url = env::var("OPENWEATHER_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_seconds = env::var("WEATHER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.timeout_seconds);

        let connect_timeout_seconds = env::var("WEATHER_CONNECT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.connect_timeout_seconds);

        Self {
            api_key,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout_seconds,
            connect_timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Whether the service is still running with the placeholder key
    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}

// Keeps the API key out of logs and panic messages.
impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}
