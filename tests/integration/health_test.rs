//! Integration tests for the health endpoint.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["backend"], "memory");
    assert_eq!(response.data()["database"], true);
    assert_eq!(response.data()["storage"], true);
}
