//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use nexus_core::config::AppConfig;
use nexus_service::Services;

/// Application state passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Every service, wired over one backend and one storage provider
    pub services: Arc<Services>,
}

impl AppState {
    /// Creates the state.
    pub fn new(config: AppConfig, services: Services) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
