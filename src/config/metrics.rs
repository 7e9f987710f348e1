//! Metrics configuration.

use std::env;

/// Whether request and prediction metrics are collected and `/metrics` is
/// served. Disabled, the endpoint answers 503 and nothing is recorded.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Reads `METRICS_ENABLED`; unrecognized values keep metrics on.
    pub fn from_env() -> Self {
        let enabled = env::var("METRICS_ENABLED")
            .ok()
            .and_then(|v| parse_switch(&v))
            .unwrap_or(true);

        Self { enabled }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("true"), Some(true));
        assert_eq!(parse_switch(" ON "), Some(true));
        assert_eq!(parse_switch("1"), Some(true));
        assert_eq!(parse_switch("FALSE"), Some(false));
        assert_eq!(parse_switch("no"), Some(false));
        assert_eq!(parse_switch("0"), Some(false));
        assert_eq!(parse_switch("maybe"), None);
        assert_eq!(parse_switch(""), None);
    }
}
