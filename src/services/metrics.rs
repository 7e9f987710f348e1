//! Prometheus metrics for the service.

use prometheus::{CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::{Duration, Instant};

pub const METRICS_ROUTE: &str = "/metrics";

/// Application metrics collector.
///
/// Clones share the same registry and counters.
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub app_uptime_seconds: Gauge,
    pub app_info: CounterVec,
    pub weather_fetch_total: CounterVec,
    pub predictions_total: CounterVec,
    pub start_time: Instant,
}

impl AppMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        let app_info = CounterVec::new(
            Opts::new("app_info", "Application information"),
            &["version"],
        )?;

        let weather_fetch_total = CounterVec::new(
            Opts::new(
                "weather_fetch_total",
                "Weather provider requests by outcome",
            ),
            &["outcome"],
        )?;

        let predictions_total = CounterVec::new(
            Opts::new("predictions_total", "Predictions served by disaster type"),
            &["disaster_type"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(app_info.clone()))?;
        registry.register(Box::new(weather_fetch_total.clone()))?;
        registry.register(Box::new(predictions_total.clone()))?;

        app_info
            .with_label_values(&[env!("CARGO_PKG_VERSION")])
            .inc();

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            app_uptime_seconds,
            app_info,
            weather_fetch_total,
            predictions_total,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request. Scrapes of the metrics route are skipped.
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == METRICS_ROUTE {
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    /// `outcome` is `success` or a weather error kind
    pub fn record_weather_fetch(&self, outcome: &str) {
        self.weather_fetch_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_prediction(&self, disaster_type: &str) {
        self.predictions_total
            .with_label_values(&[disaster_type])
            .inc();
    }

    pub fn update_uptime(&self) {
        self.app_uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}
