// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mergington_activities::config::Config;
use mergington_activities::routes::create_router;
use mergington_activities::services::ActivityRoster;
use mergington_activities::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app seeded with the built-in catalog.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

/// Create a test app with the given config and the built-in catalog.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (Router, Arc<AppState>) {
    let roster =
        ActivityRoster::builtin(config.enforce_capacity).expect("Built-in seed should load");
    let state = Arc::new(AppState { config, roster });

    (create_router(state.clone()), state)
}

/// Send a bodiless request and decode the JSON response.
#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Current participants of an activity as reported by `GET /activities`.
#[allow(dead_code)]
pub async fn participants(app: &Router, activity: &str) -> Vec<String> {
    let (status, json) = send(app, "GET", "/activities").await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(json[activity]["participants"].clone()).unwrap()
}
