//! Per-client rate limiting for the prediction endpoint.

use crate::{config::RateLimitConfig, error::ApiError};
use actix_web::HttpRequest;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Fixed-window, in-memory rate limiter keyed by client address.
///
/// State is local to the process; clones share the same counters.
#[derive(Clone)]
pub struct SimpleRateLimiter {
    config: RateLimitConfig,
    windows: Arc<Mutex<HashMap<String, (usize, Instant)>>>,
}

impl SimpleRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn period(&self) -> Duration {
        Duration::from_secs(self.config.period_seconds)
    }

    /// Count a request for `key`.
    ///
    /// Returns `true` if the request is allowed, `false` if the key has used
    /// up its budget for the current window.
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let period = self.period();
        let now = Instant::now();
        // The map holds plain counters, so a poisoned lock is still usable.
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        windows.retain(|_, (_, started)| now.duration_since(*started) < period);

        match windows.get_mut(key) {
            Some((count, _)) if *count >= self.config.requests_per_minute => false,
            Some((count, _)) => {
                *count += 1;
                true
            }
            None => {
                windows.insert(key.to_string(), (1, now));
                true
            }
        }
    }
}

/// Reject the request with [`ApiError::RateLimited`] once the caller's
/// address is over its limit.
pub fn enforce_rate_limit(req: &HttpRequest, limiter: &SimpleRateLimiter) -> Result<(), ApiError> {
    let client = req
        .connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string();

    if limiter.check_rate_limit(&client) {
        Ok(())
    } else {
        tracing::warn!(client = %client, "Rate limit exceeded");
        Err(ApiError::RateLimited)
    }
}
