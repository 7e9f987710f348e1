//! Health check endpoint handler.

use crate::models::HealthResponse;
use actix_web::{Error, Result, web};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Liveness probe for load balancers and orchestrators. Never rate limited
/// and never touches the weather provider.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the service health status in JSON format.",
    tags("Health"),
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> Result<web::Json<HealthResponse>, Error> {
    Ok(web::Json(HealthResponse::healthy()))
}
