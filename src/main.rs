use actix_web::HttpServer;
use disaster_prediction_api::{AppConfig, AppState, create_app, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env();
    telemetry::init_tracing(config.log_format);

    if let Err(err) = dotenv {
        tracing::debug!(error = %err, "No .env file loaded");
    }

    if config.weather.uses_placeholder_key() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; weather requests will be rejected by the provider");
    }

    let state = AppState::from_config(config.clone()).map_err(|err| {
        tracing::error!(error = %err, "Failed to initialize application");
        std::io::Error::other(err)
    })?;

    let (host, port) = config.bind_address();
    tracing::info!(
        host = %host,
        port,
        weather_provider = %config.weather.base_url,
        rate_limit_rpm = config.rate_limit.requests_per_minute,
        "Starting Mock Disaster Prediction API"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind((host, port))?
        .run()
        .await
}
