//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use nexus_api::{AppState, build_app};
use nexus_core::config::{AppConfig, DatabaseBackend, StorageBackend};
use nexus_database::{MemoryDatabase, Repositories};
use nexus_service::Services;
use nexus_storage::MemoryStorageProvider;

const BOUNDARY: &str = "nexus-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Repositories behind the router, for direct setup and checks
    pub repositories: Repositories,
    /// Content store behind the router
    pub storage: MemoryStorageProvider,
}

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
    pub raw: bytes::Bytes,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// Configuration for an in-memory test server.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = DatabaseBackend::Memory;
    config.storage.provider = StorageBackend::Memory;
    config.consistency.retry_backoff_ms = 1;
    config.consistency.reconcile_on_startup = false;
    config
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application from an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let repositories = Repositories::memory(MemoryDatabase::shared());
        let storage = MemoryStorageProvider::new();
        let services = Services::new(repositories.clone(), Arc::new(storage.clone()), &config);
        let router = build_app(AppState::new(config, services));

        Self {
            router,
            repositories,
            storage,
        }
    }

    /// Send a JSON request, optionally as `(group, email)`
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        caller: Option<(&str, &str)>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some((group, email)) = caller {
            req = req.header("x-group-id", group).header("x-user-email", email);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload `content` as `name` into `folder_id`
    pub async fn upload(
        &self,
        caller: (&str, &str),
        folder_id: i64,
        name: &str,
        visibility: bool,
        content: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        for (field, value) in [
            ("name", name.to_string()),
            ("folder_id", folder_id.to_string()),
            ("visibility", visibility.to_string()),
        ] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("x-group-id", caller.0)
            .header("x-user-email", caller.1)
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Create a folder and return its id
    pub async fn create_folder(&self, group: &str, name: &str, visibility: bool) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "visibility": visibility })),
                Some((group, &format!("{group}-admin@lab.edu"))),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"].as_i64().expect("folder id")
    }

    /// Current stored file count of a folder
    pub async fn file_count(&self, folder_id: i64) -> i64 {
        let response = self
            .request("GET", &format!("/api/folders/{folder_id}"), None, None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.data()["file_count"].as_i64().expect("file count")
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }
}

/// Names extracted from a list response.
pub fn names(response: &TestResponse) -> Vec<String> {
    response
        .data()
        .as_array()
        .expect("array data")
        .iter()
        .map(|v| v["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
