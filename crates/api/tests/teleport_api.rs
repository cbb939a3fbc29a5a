//! Integration tests for the teleport queue endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with, get, post_json, post_raw, RecordingSink};
use modbridge_core::teleport::QueuePolicy;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: N enqueues followed by one poll return those N in order, then nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn poll_drains_in_insertion_order() {
    let app = build_test_app();

    for target in ["Alice", "Bob", "Carol"] {
        let response = post_json(
            &app.router,
            "/request-teleport",
            json!({ "modUsername": "Mod1", "targetUsername": target }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "success": true, "message": "Teleport request queued." })
        );
    }

    let json = body_json(get(&app.router, "/poll-teleport").await).await;
    assert_eq!(
        json,
        json!({
            "requests": [
                { "modUsername": "Mod1", "targetUsername": "Alice" },
                { "modUsername": "Mod1", "targetUsername": "Bob" },
                { "modUsername": "Mod1", "targetUsername": "Carol" },
            ]
        })
    );

    let again = body_json(get(&app.router, "/poll-teleport").await).await;
    assert_eq!(again, json!({ "requests": [] }));
}

// ---------------------------------------------------------------------------
// Test: missing names are rejected and nothing is queued
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_names_are_rejected() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/request-teleport",
        json!({ "modUsername": "Mod1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Missing modUsername or targetUsername");
    assert_eq!(app.queue.pending().await, 0);
}

// ---------------------------------------------------------------------------
// Test: unreadable body is answered like an empty one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_body_is_rejected_with_success_false() {
    let app = build_test_app();
    let response = post_raw(&app.router, "/request-teleport", "][".into()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

// ---------------------------------------------------------------------------
// Test: the strict variant requires a job id, the lenient one does not
// ---------------------------------------------------------------------------

#[tokio::test]
async fn job_id_requirement_follows_policy() {
    let body = json!({ "modUsername": "Mod1", "targetUsername": "Alice" });

    let lenient = build_test_app();
    let response = post_json(&lenient.router, "/request-teleport", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let strict = build_test_app_with(
        QueuePolicy {
            require_job_id: true,
        },
        RecordingSink::new(),
    );
    let response = post_json(&strict.router, "/request-teleport", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
    assert_eq!(strict.queue.pending().await, 0);
}

// ---------------------------------------------------------------------------
// Test: job id is carried through to the poller
// ---------------------------------------------------------------------------

#[tokio::test]
async fn job_id_is_returned_by_poll() {
    let app = build_test_app_with(
        QueuePolicy {
            require_job_id: true,
        },
        RecordingSink::new(),
    );

    post_json(
        &app.router,
        "/request-teleport",
        json!({ "modUsername": "Mod1", "targetUsername": "Alice", "jobId": "abc-123" }),
    )
    .await;

    let json = body_json(get(&app.router, "/poll-teleport").await).await;
    assert_eq!(json["requests"][0]["jobId"], "abc-123");
}
