//! HTTP integration tests, driven through the router on the in-memory
//! backend.

mod helpers;

mod activity_test;
mod file_test;
mod folder_test;
mod health_test;
