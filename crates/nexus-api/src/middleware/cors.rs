//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use nexus_core::config::CorsConfig;

const METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// Builds a CORS tower layer from configuration.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin(&config.allowed_origins))
        .allow_methods(METHODS)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

/// `*` anywhere in the list opens the API to every origin; unparsable entries are skipped.
fn allowed_origin(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }
    AllowOrigin::list(
        origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cors_layer_accepts_explicit_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://lab.example.edu".into(), "bad\norigin".into()],
            max_age_seconds: 60,
        };
        let _layer = build_cors_layer(&config);
        let _any = allowed_origin(&["*".to_string()]);
    }
}
