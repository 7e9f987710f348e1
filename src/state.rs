//! Shared components built once at startup.

use crate::{
    config::AppConfig,
    error::StartupError,
    services::{AppMetrics, DisasterBucketTable, SimpleRateLimiter, WeatherService},
};
use std::sync::Arc;

/// Everything the app factory registers as app data.
///
/// Built once in `main` and cloned into each worker; clones share the rate
/// limiter counters, the metrics registry and the HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub weather: WeatherService,
    pub buckets: Arc<DisasterBucketTable>,
    pub limiter: SimpleRateLimiter,
    pub metrics: AppMetrics,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        let weather = WeatherService::new(config.weather.clone())?;
        let buckets = Arc::new(DisasterBucketTable::standard()?);
        let limiter = SimpleRateLimiter::new(config.rate_limit.clone());
        let metrics = AppMetrics::new()?;

        Ok(Self {
            config,
            weather,
            buckets,
            limiter,
            metrics,
        })
    }
}
