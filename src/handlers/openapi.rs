//! OpenAPI specification generation and app factory.

use crate::{
    handlers::{get_metrics, health, predict_disaster},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    state::AppState,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// OpenAPI v2 document served at `/api/spec/v2`
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Mock Disaster Prediction API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Derives a deterministic mock disaster prediction from the current weather at a location.\n\n\
                ## How predictions are made\n\
                1. Current weather is fetched from OpenWeatherMap for the given coordinates.\n\
                2. Temperature, humidity, wind speed, pressure, cloud coverage and description are joined with `_`.\n\
                3. The string is hashed with SHA-256.\n\
                4. The first digest byte selects one of eight disaster types.\n\
                \n\
                Identical weather always yields the identical prediction. \
                This is a mock service for testing purposes only. Not for actual disaster response.\n\
                \n\
                ## Rate limiting\n\
                `POST /predict-disaster` is limited per client address (default 60 requests per minute). \
                Excess requests receive `429 Too Many Requests`."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application with all routes, middleware and shared state.
///
/// Used by `main` for every worker and by the integration tests.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppState {
        config,
        weather,
        buckets,
        limiter,
        metrics,
    } = state;

    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware::new(metrics.clone(), &config.metrics))
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(config.metrics.clone()))
        .app_data(web::Data::new(config))
        .app_data(web::Data::new(weather))
        .app_data(web::Data::from(buckets))
        .app_data(web::Data::new(limiter))
        .app_data(web::Data::new(metrics))
        .service(web::resource("/predict-disaster").route(web::post().to(predict_disaster)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
