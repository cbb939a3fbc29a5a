//! Integration tests for `POST /alert`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with, post_json, post_raw, RecordingSink};
use modbridge_core::teleport::QueuePolicy;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: a valid alert is delivered exactly once with an enabled claim button
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_alert_is_delivered_once() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/alert",
        json!({ "player": "Bob", "userId": 123, "flagType": "Speed", "joinUrl": "x" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Alert sent to Discord");
    assert_eq!(json["data"]["messageId"], "1000");

    let delivered = app.sink.delivered().await;
    assert_eq!(delivered.len(), 1);

    let notice = &delivered[0];
    assert_eq!(notice.fields[0].value, "Bob (123)");
    assert_eq!(notice.fields[1].value, "Speed");
    assert_eq!(notice.fields[2].value, "No details provided");
    assert_eq!(notice.control.label, "Claim Alert");
    assert!(!notice.control.disabled);
}

// ---------------------------------------------------------------------------
// Test: each alert gets its own message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn consecutive_alerts_get_distinct_message_ids() {
    let app = build_test_app();
    let body = json!({ "player": "Bob", "flagType": "Fly", "joinUrl": "x", "details": "y=900" });

    let first = body_json(post_json(&app.router, "/alert", body.clone()).await).await;
    let second = body_json(post_json(&app.router, "/alert", body).await).await;

    assert_ne!(first["data"]["messageId"], second["data"]["messageId"]);
    assert_eq!(app.sink.delivered().await.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: each required field missing yields 400 and no delivery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let complete = json!({ "player": "Bob", "userId": 1, "flagType": "Speed", "joinUrl": "x" });

    for field in ["player", "flagType", "joinUrl"] {
        let app = build_test_app();
        let mut body = complete.clone();
        body.as_object_mut().unwrap().remove(field);

        let response = post_json(&app.router, "/alert", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {field}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(
            json["error"],
            format!("Missing required fields: {field}")
        );
        assert!(app.sink.delivered().await.is_empty());
    }
}

// ---------------------------------------------------------------------------
// Test: malformed JSON is a client error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = build_test_app();
    let response = post_raw(&app.router, "/alert", "{not json".into()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    assert!(app.sink.delivered().await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: unreachable destination is a sanitized 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sink_failure_returns_internal_error() {
    let app = build_test_app_with(QueuePolicy::default(), RecordingSink::failing());

    let response = post_json(
        &app.router,
        "/alert",
        json!({ "player": "Bob", "flagType": "Speed", "joinUrl": "x" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: unusual userId values are rendered, never rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn any_user_id_value_is_accepted() {
    let app = build_test_app();

    for (user_id, rendered) in [
        (json!(-1), "Bob (-1)"),
        (json!(123.0), "Bob (123.0)"),
        (json!(true), "Bob (true)"),
        (json!(null), "Bob (unknown)"),
    ] {
        let response = post_json(
            &app.router,
            "/alert",
            json!({ "player": "Bob", "userId": user_id, "flagType": "Speed", "joinUrl": "x" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "userId {user_id}");

        let delivered = app.sink.delivered().await;
        assert_eq!(delivered.last().unwrap().fields[0].value, rendered);
    }
}

// ---------------------------------------------------------------------------
// Test: oversized details still produce a deliverable notice
// ---------------------------------------------------------------------------

#[tokio::test]
async fn oversized_details_are_delivered_clamped() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/alert",
        json!({
            "player": "Bob",
            "flagType": "Speed",
            "joinUrl": "x",
            "details": "a".repeat(2000),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let delivered = app.sink.delivered().await;
    assert_eq!(delivered[0].fields[2].value.chars().count(), 1024);
}
