//! Request metrics middleware.

use crate::{config::MetricsConfig, services::AppMetrics, utils::route::extract_route_pattern};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    time::Instant,
};

/// Records method, matched route, status and latency of each request.
///
/// Holds its own handle to the registry; built without one when metrics
/// are disabled, in which case requests pass straight through.
pub struct MetricsMiddleware {
    metrics: Option<AppMetrics>,
}

impl MetricsMiddleware {
    pub fn new(metrics: AppMetrics, config: &MetricsConfig) -> Self {
        Self {
            metrics: config.enabled.then_some(metrics),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsService {
            service,
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct MetricsService<S> {
    service: S,
    metrics: Option<AppMetrics>,
}

impl<S, B> Service<ServiceRequest> for MetricsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(metrics) = self.metrics.clone() else {
            return Box::pin(self.service.call(req));
        };

        let start_time = Instant::now();
        let method = req.method().to_string();
        let route = extract_route_pattern(req.request());
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            metrics.record_request(&method, &route, res.status().as_u16(), start_time.elapsed());
            metrics.update_uptime();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    async fn ping() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn render_after_ping(enabled: bool) -> String {
        let metrics = AppMetrics::new().unwrap();
        let app = test::init_service(
            App::new()
                .wrap(MetricsMiddleware::new(
                    metrics.clone(),
                    &MetricsConfig { enabled },
                ))
                .route("/ping", web::get().to(ping)),
        )
        .await;

        let req = test::TestRequest::get().uri("/ping").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        metrics.render().unwrap()
    }

    #[actix_web::test]
    async fn test_records_matched_route() {
        let output = render_after_ping(true).await;
        assert!(output.contains("route=\"/ping\""));
    }

    #[actix_web::test]
    async fn test_disabled_records_nothing() {
        let output = render_after_ping(false).await;
        assert!(!output.contains("route=\"/ping\""));
    }
}
