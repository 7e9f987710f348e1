//! Mock Disaster Prediction API
//!
//! An Actix Web service that fetches the current weather for a pair of
//! coordinates and turns it into a deterministic, entirely fictional
//! "disaster prediction". The weather observation is normalized, rendered
//! into a canonical string, hashed with SHA-256, and the first digest byte
//! picks one of eight disaster buckets.
//!
//! ## Architecture
//!
//! - `models/` - Request/response bodies, coordinates, snapshot and prediction records
//! - `services/` - Weather client and normalizer, prediction pipeline, rate limiting, metrics
//! - `handlers/` - HTTP handlers and the app factory
//! - `middleware/` - Request IDs with request logging, and metrics
//! - `config/` - Environment-backed configuration
//! - `error` - Error taxonomy and HTTP error rendering
//! - `telemetry` - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use disaster_prediction_api::{AppConfig, AppState, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = AppConfig::from_env();
//!     let state = AppState::from_config(config.clone()).map_err(std::io::Error::other)?;
//!
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind(config.bind_address())?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use config::{AppConfig, MetricsConfig, RateLimitConfig, WeatherConfig};
pub use error::{ApiError, StartupError};
pub use handlers::{create_app, create_openapi_spec, get_metrics, health, predict_disaster};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    Coordinates, DisasterPrediction, ErrorResponse, HealthResponse, PredictionResponse, Reading,
    RiskLevel, WeatherSnapshot,
};
pub use services::{
    AppMetrics, DisasterBucket, DisasterBucketTable, NormalizeError, PredictionKey,
    SimpleRateLimiter, TableError, WeatherError, WeatherService, derive_key, normalize,
};
pub use state::AppState;
