#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for API tests.
//!
//! Builds the real kernel router around the built-in menu and drives it
//! in-process with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use campus_kernel::{AppState, MenuRegistry, routes};

/// Test application wrapper using the real kernel routes and state.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// App serving the built-in menu.
    pub fn new() -> Self {
        let registry = MenuRegistry::builtin().expect("built-in menu should load");
        Self::with_menus(registry)
    }

    /// App serving a custom menu.
    pub fn with_menus(registry: MenuRegistry) -> Self {
        let router = routes::api_router().with_state(AppState::with_menus(registry));
        Self { router }
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    /// POST a raw body with a JSON content type.
    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// GET and decode the JSON response.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
