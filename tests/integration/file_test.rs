//! Integration tests for file operations.

use http::{StatusCode, header};

use crate::helpers::{TestApp, names, test_config};

const ANA: (&str, &str) = ("g1", "ana@lab.edu");
const BEN: (&str, &str) = ("g2", "ben@lab.edu");

#[tokio::test]
async fn test_upload_records_file_and_bumps_count() {
    let app = TestApp::new();
    let folder = app.create_folder("g1", "Notes", false).await;

    let response = app.upload(ANA, folder, "notes.txt", false, b"hello lab").await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let file = response.data();
    assert_eq!(file["id"], 1);
    assert_eq!(file["folder_id"], folder);
    assert_eq!(file["name"], "notes.txt");
    assert_eq!(file["owner_group_id"], "g1");
    assert_eq!(file["uploaded_by"], "ana@lab.edu");
    assert_eq!(file["size_bytes"], 9);

    assert_eq!(app.file_count(folder).await, 1);
    assert_eq!(app.storage.len(), 1);
}

#[tokio::test]
async fn test_upload_to_missing_folder_is_not_found() {
    let app = TestApp::new();
    let response = app.upload(ANA, 77, "a.txt", false, b"a").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn test_upload_over_cap_is_rejected() {
    let mut config = test_config();
    config.storage.max_upload_size_bytes = 16;
    let app = TestApp::with_config(config);
    let folder = app.create_folder("g1", "Small", false).await;

    let response = app.upload(ANA, folder, "big.bin", false, &[7u8; 17]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.file_count(folder).await, 0);
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn test_download_streams_content() {
    let app = TestApp::new();
    let folder = app.create_folder("g1", "Notes", false).await;
    let upload = app.upload(ANA, folder, "notes.txt", false, b"hello lab").await;
    let id = upload.data()["id"].as_i64().unwrap();

    let response = app
        .request("GET", &format!("/api/files/{id}/download"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "text/plain");
    assert_eq!(&response.raw[..], b"hello lab");

    let response = app.request("GET", "/api/files/404/download", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_file_updates_count_and_missing_is_not_found() {
    let app = TestApp::new();
    let folder = app.create_folder("g1", "Data", false).await;
    let first = app.upload(ANA, folder, "a.txt", false, b"a").await;
    app.upload(ANA, folder, "b.txt", false, b"b").await;
    assert_eq!(app.file_count(folder).await, 2);

    let id = first.data()["id"].as_i64().unwrap();
    let response = app.request("DELETE", &format!("/api/files/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "a.txt");
    assert_eq!(app.file_count(folder).await, 1);
    assert_eq!(app.storage.len(), 1);

    let response = app.request("DELETE", &format!("/api/files/{id}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.file_count(folder).await, 1);
}

#[tokio::test]
async fn test_list_files_by_folder_filters_visibility() {
    let app = TestApp::new();
    let folder = app.create_folder("g1", "Shared", true).await;
    app.upload(ANA, folder, "public.txt", true, b"p").await;
    app.upload(ANA, folder, "private.txt", false, b"q").await;

    let path = format!("/api/folders/{folder}/files");
    let response = app.request("GET", &path, None, Some(ANA)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response), vec!["public.txt", "private.txt"]);

    let response = app.request("GET", &path, None, Some(BEN)).await;
    assert_eq!(names(&response), vec!["public.txt"]);

    let response = app.request("GET", "/api/folders/55/files", None, Some(ANA)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_files() {
    let app = TestApp::new();
    let folder = app.create_folder("g1", "Docs", true).await;
    app.upload(ANA, folder, "Report_Final.pdf", true, b"r").await;
    app.upload(ANA, folder, "draft.docx", false, b"d").await;

    let response = app
        .request("GET", "/api/files/search?q=report", None, Some(BEN))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response), vec!["Report_Final.pdf"]);

    let response = app.request("GET", "/api/files/search?q=", None, Some(ANA)).await;
    assert_eq!(names(&response).len(), 2);

    let response = app.request("GET", "/api/files/search?q=", None, Some(BEN)).await;
    assert_eq!(names(&response), vec!["Report_Final.pdf"]);
}
