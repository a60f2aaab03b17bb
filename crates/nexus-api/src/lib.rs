//! # nexus-api
//!
//! HTTP API layer for Research Nexus built on Axum.
//!
//! Provides the REST endpoints, the caller extractor, request logging and
//! CORS middleware, DTOs, and the mapping of `AppError` onto HTTP
//! responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
