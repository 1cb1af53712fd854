//! Requests succeed even when every notification fails to send.

#![allow(clippy::unwrap_used)]

use autopulse_integration_tests::{TestServer, closed_port};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn start_with_unreachable_relay() -> TestServer {
    let port = closed_port().to_string();
    TestServer::start_with(&[
        ("SMTP_EMAIL", "ops@autopulse.io"),
        ("SMTP_PASSWORD", "kq8Zp2vN"),
        ("SMTP_HOST", "127.0.0.1"),
        ("SMTP_PORT", &port),
        ("ALERT_MANAGER_EMAIL", "manager@autopulse.io"),
        ("ALERT_SUPPORT_EMAIL", "support@autopulse.io"),
    ])
    .await
}

#[tokio::test]
async fn test_health_reports_email_enabled() {
    let server = start_with_unreachable_relay().await;

    let health = server.get_json("/api/health").await;
    assert_eq!(health, json!({"status": "OK", "email": true}));
}

#[tokio::test]
async fn test_submission_succeeds_when_relay_is_down() {
    let server = start_with_unreachable_relay().await;

    let resp = server
        .submit(&json!({
            "email": "a@b.com",
            "rating": 1,
            "packageDamaged": "Yes",
            "feedback": "crushed box"
        }))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": true, "message": "Feedback saved successfully"})
    );

    let feedback = server.get_json("/api/feedback").await;
    assert_eq!(feedback.as_array().map(Vec::len), Some(1));
    assert_eq!(feedback[0]["email"], "a@b.com");

    let issues = server.get_json("/api/issues").await;
    assert_eq!(issues.as_array().map(Vec::len), Some(2));
}
