//! Behavior when a collection file is corrupt.

#![allow(clippy::unwrap_used)]

use autopulse_integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

const GARBAGE: &str = "[{\"timestamp\": \"2025-01-01T00:00:00Z\", \"email\":";

#[tokio::test]
async fn test_corrupt_feedback_fails_loudly_and_is_preserved() {
    let server = TestServer::start().await;
    let path = server.collection_path("feedback.json");
    std::fs::write(&path, GARBAGE).unwrap();

    let resp = server.get("/api/feedback").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": false, "error": "Internal server error"})
    );

    let resp = server
        .submit(&json!({"email": "a@b.com", "rating": 1}))
        .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = server.get("/api/stats").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = server.get("/health/ready").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), GARBAGE);
    assert_eq!(
        server.get("/api/issues").await.json::<Value>().await.unwrap(),
        json!([])
    );
}

#[tokio::test]
async fn test_corrupt_issues_keep_the_feedback_write() {
    let server = TestServer::start().await;
    std::fs::write(server.collection_path("issues.json"), "{}").unwrap();

    let resp = server
        .submit(&json!({"email": "a@b.com", "rating": 1}))
        .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let feedback = server.get_json("/api/feedback").await;
    assert_eq!(feedback.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_deleted_collection_reads_empty() {
    let server = TestServer::start().await;
    std::fs::remove_file(server.data_dir().join("issues.json")).unwrap();

    assert_eq!(server.get_json("/api/issues").await, json!([]));
    assert_eq!(
        server.get("/health/ready").await.status(),
        StatusCode::OK
    );
}
