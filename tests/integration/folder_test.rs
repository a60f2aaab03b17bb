//! Integration tests for folder operations.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, names};

const ANA: (&str, &str) = ("g1", "ana@lab.edu");
const BEN: (&str, &str) = ("g2", "ben@lab.edu");

#[tokio::test]
async fn test_create_folder_assigns_sequential_ids() {
    let app = TestApp::new();

    let first = app
        .request("POST", "/api/folders", Some(json!({ "name": "Thesis" })), Some(ANA))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["success"], true);
    assert_eq!(first.data()["id"], 1);
    assert_eq!(first.data()["file_count"], 0);
    assert_eq!(first.data()["owner_group_id"], "g1");
    assert_eq!(first.data()["visibility"], false);

    let second = app
        .request("POST", "/api/folders", Some(json!({ "name": "Data" })), Some(ANA))
        .await;
    assert_eq!(second.data()["id"], 2);
}

#[tokio::test]
async fn test_create_folder_requires_caller_and_name() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/folders", Some(json!({ "name": "Thesis" })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request("POST", "/api/folders", Some(json!({ "name": "" })), Some(ANA))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_folders_shows_own_and_public_only() {
    let app = TestApp::new();
    app.create_folder("g1", "ana-private", false).await;
    app.create_folder("g2", "ben-public", true).await;
    app.create_folder("g2", "ben-private", false).await;

    let response = app.request("GET", "/api/folders", None, Some(ANA)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response), vec!["ana-private", "ben-public"]);

    let response = app.request("GET", "/api/folders", None, Some(BEN)).await;
    assert_eq!(names(&response), vec!["ben-public", "ben-private"]);
}

#[tokio::test]
async fn test_search_folders_is_case_insensitive_and_scoped() {
    let app = TestApp::new();
    app.create_folder("g1", "Lab Reports", false).await;
    app.create_folder("g2", "Shared reports", true).await;
    app.create_folder("g2", "hidden reports", false).await;

    let response = app
        .request("GET", "/api/folders/search?q=REPORT", None, Some(ANA))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response), vec!["Lab Reports", "Shared reports"]);

    let response = app.request("GET", "/api/folders/search", None, Some(ANA)).await;
    assert_eq!(names(&response).len(), 2);
}

#[tokio::test]
async fn test_update_folder() {
    let app = TestApp::new();
    let id = app.create_folder("g1", "Draft", false).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{id}"),
            Some(json!({ "name": "Final", "visibility": true })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Final");
    assert_eq!(response.data()["visibility"], true);

    let response = app
        .request("PATCH", &format!("/api/folders/{id}"), Some(json!({ "name": "" })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("PATCH", "/api/folders/99", Some(json!({ "name": "x" })), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_folder_blocked_while_it_has_files() {
    let app = TestApp::new();
    let id = app.create_folder("g1", "Data", false).await;
    let upload = app.upload(ANA, id, "a.csv", false, b"1,2,3").await;
    assert_eq!(upload.status, StatusCode::CREATED);

    let response = app.request("DELETE", &format!("/api/folders/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.file_count(id).await, 1);

    let file_id = upload.data()["id"].as_i64().unwrap();
    let response = app.request("DELETE", &format!("/api/files/{file_id}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("DELETE", &format!("/api/folders/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["deleted"], true);
    assert_eq!(response.data()["id"], id);

    let response = app.request("GET", &format!("/api/folders/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_folder_id_is_rejected() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/folders/abc", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_reconcile_repairs_drift() {
    let app = TestApp::new();
    let id = app.create_folder("g1", "Data", false).await;
    app.upload(ANA, id, "a.txt", false, b"a").await;

    app.repositories
        .folders
        .increment_file_count(nexus_core::types::FolderId(id))
        .await
        .unwrap();
    assert_eq!(app.file_count(id).await, 2);

    let response = app
        .request("POST", &format!("/api/folders/{id}/reconcile"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["recorded"], 2);
    assert_eq!(response.data()["actual"], 1);
    assert_eq!(response.data()["drifted"], true);
    assert_eq!(app.file_count(id).await, 1);

    let response = app
        .request("POST", &format!("/api/folders/{id}/reconcile"), None, None)
        .await;
    assert_eq!(response.data()["drifted"], false);

    let response = app.request("POST", "/api/folders/42/reconcile", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
