//! HTTP utility functions for extracting request information.

use actix_web::HttpRequest;

/// Best-effort client address for logging.
///
/// Prefers the first entry of common proxy headers and falls back to the
/// socket peer address.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    let ip_headers = ["X-Forwarded-For", "X-Real-IP", "CF-Connecting-IP"];

    for header_name in &ip_headers {
        if let Some(ip) = req
            .headers()
            .get(*header_name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return ip.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
