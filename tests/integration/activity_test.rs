//! Integration tests for student activity.

use chrono::{Days, Local};
use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

async fn enroll(app: &TestApp, email: &str) {
    let response = app
        .request(
            "POST",
            "/api/students",
            Some(json!({ "email": email, "name": "Ana", "group_id": "g1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
}

#[tokio::test]
async fn test_same_day_minutes_accumulate() {
    let app = TestApp::new();
    enroll(&app, "ana@lab.edu").await;

    for minutes in [5, 3] {
        let response = app
            .request(
                "POST",
                "/api/activity",
                Some(json!({ "email": "ana@lab.edu", "minutes": minutes, "date": "2024-03-10" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app.request("GET", "/api/students/ana@lab.edu", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let history = response.data()["daily_activity"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["date"], "2024-03-10");
    assert_eq!(history[0]["minutes_spent"], 8);
}

#[tokio::test]
async fn test_weekly_summary_covers_last_seven_days() {
    let app = TestApp::new();
    enroll(&app, "ana@lab.edu").await;

    let today = Local::now().date_naive();
    for (days_ago, minutes) in [(0, 10), (3, 20), (10, 30)] {
        let date = today.checked_sub_days(Days::new(days_ago)).unwrap();
        app.request(
            "POST",
            "/api/activity",
            Some(json!({ "email": "ana@lab.edu", "minutes": minutes, "date": date })),
            None,
        )
        .await;
    }

    let response = app
        .request("GET", "/api/activity/ana@lab.edu/weekly", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["weekly_summary"], 30);
    assert_eq!(response.data()["daily_activity"].as_array().unwrap().len(), 3);

    let response = app.request("GET", "/api/students/ana@lab.edu", None, None).await;
    assert_eq!(response.data()["student"]["weekly_summary"], 30);
}

#[tokio::test]
async fn test_activity_rejects_bad_input() {
    let app = TestApp::new();
    enroll(&app, "ana@lab.edu").await;

    let response = app
        .request(
            "POST",
            "/api/activity",
            Some(json!({ "email": "ana@lab.edu", "minutes": -4 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/activity",
            Some(json!({ "email": "nobody@lab.edu", "minutes": 4 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/activity/nobody@lab.edu/weekly", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "POST",
            "/api/students",
            Some(json!({ "email": "not-an-email", "group_id": "g1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
