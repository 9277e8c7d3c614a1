#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use student_registry::{app, seed_fixtures, AppState, MemoryStudentStore, Settings, StudentService};
use tower::util::ServiceExt;

pub const TEST_BODY_LIMIT: usize = 16 * 1024;

pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Router over a memory store holding the fixture students (ids 1..=5).
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStudentStore::new());
        seed_fixtures(store.as_ref())
            .await
            .expect("Failed to seed fixtures");
        Self::with_store(store)
    }

    pub fn empty() -> Self {
        Self::with_store(Arc::new(MemoryStudentStore::new()))
    }

    fn with_store(store: Arc<MemoryStudentStore>) -> Self {
        let state = AppState::new(StudentService::new(store));
        let settings = Settings {
            body_limit_bytes: TEST_BODY_LIMIT,
            ..Settings::default()
        };
        TestApp {
            router: app(state, &settings),
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send_json("POST", uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send_json("PUT", uri, body).await
    }

    /// POST with an explicit `content-length` header.
    pub async fn post_json_with_length(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .header("content-length", body.len())
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send_json(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse JSON")
        };
        (status, body)
    }
}

pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|s| s["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
