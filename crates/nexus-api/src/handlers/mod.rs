//! HTTP request handlers, one module per domain.

pub mod activity;
pub mod file;
pub mod folder;
pub mod health;
