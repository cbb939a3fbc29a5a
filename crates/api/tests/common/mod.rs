#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use modbridge_api::config::{RelayBackend, ServerConfig};
use modbridge_api::router::build_app_router;
use modbridge_api::state::AppState;
use modbridge_core::alert::{AlertNotice, AlertSink, DeliveredAlert};
use modbridge_core::claim::MemoryClaimStore;
use modbridge_core::error::CoreError;
use modbridge_core::teleport::{QueuePolicy, TeleportQueue};
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Alert sink that records notices instead of posting them.
pub struct RecordingSink {
    delivered: Mutex<Vec<AlertNotice>>,
    next_id: AtomicU64,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1_000),
            fail: false,
        }
    }

    /// A sink whose destination is unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub async fn delivered(&self) -> Vec<AlertNotice> {
        self.delivered.lock().await.clone()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    async fn deliver(&self, notice: &AlertNotice) -> Result<DeliveredAlert, CoreError> {
        if self.fail {
            return Err(CoreError::Internal("alert channel not found".into()));
        }
        self.delivered.lock().await.push(notice.clone());
        Ok(DeliveredAlert {
            alert_id: self.next_id.fetch_add(1, Ordering::SeqCst),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(queue_policy: QueuePolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        relay_backend: RelayBackend::Queue,
        queue_policy,
    }
}

/// Application under test plus handles on its in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub sink: Arc<RecordingSink>,
    pub queue: Arc<TeleportQueue>,
}

/// Build the app with the production router and middleware stack.
pub fn build_test_app_with(queue_policy: QueuePolicy, sink: RecordingSink) -> TestApp {
    let config = test_config(queue_policy);
    let sink = Arc::new(sink);
    let queue = Arc::new(TeleportQueue::in_memory(queue_policy));

    let state = AppState {
        config: Arc::new(config.clone()),
        alert_sink: Arc::clone(&sink) as Arc<dyn AlertSink>,
        teleport_queue: Arc::clone(&queue),
        claims: Arc::new(MemoryClaimStore::new()),
    };

    TestApp {
        router: build_app_router(state, &config),
        sink,
        queue,
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(QueuePolicy::default(), RecordingSink::new())
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
