//! Route label extraction for metrics.

use actix_web::HttpRequest;

/// Label for requests that did not match a registered route
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Registered route pattern for a request.
///
/// Unknown paths collapse into a single label so scanners cannot inflate
/// metric cardinality.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
