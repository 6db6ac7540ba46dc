//! CORS layer built from `[server.cors]`.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use teamboard_core::config::CorsConfig;

use crate::extractors::team::TEAM_HEADER;

/// Builds the CORS layer. `"*"` in origins or headers allows any.
///
/// `Content-Disposition` is always exposed so browsers can read download
/// file names.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if is_wildcard(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(&config.allowed_origins))
    };

    let headers = if is_wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        let mut names = parse_all::<HeaderName>(&config.allowed_headers);
        names.push(HeaderName::from_static(TEAM_HEADER));
        AllowHeaders::list(names)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .allow_headers(headers)
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Entries that fail to parse are skipped.
fn parse_all<T: std::str::FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.trim().parse().ok()).collect()
}
