// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod crud_tests;
mod store_failure_tests;

use std::sync::Arc;

use atelier::{DocumentService, ManualClock};
use atelier_persistence::Persistence;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

const OWNER: &str = "auth0|atelier-nord";

/// Helper to create a clock stopped in May 2024.
fn may_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap(),
    ))
}

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state(clock: Arc<ManualClock>) -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        service: Arc::new(DocumentService::default()),
        clock,
    }
}

/// Sends one request through the router and decodes the JSON body, if any.
async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Builds a router with `OWNER` already registered.
async fn app_with_owner(clock: Arc<ManualClock>) -> Router {
    let app = build_router(create_test_app_state(clock));
    let (status, _) = send(
        app.clone(),
        "POST",
        "/owners",
        Some(json!({ "external_id": OWNER, "name": "Atelier Nord" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    app
}

fn document_body(display_name: &str) -> Value {
    json!({ "owner": OWNER, "display_name": display_name })
}

async fn create(app: &Router, slug: &str, display_name: &str) -> Value {
    let (status, body) = send(
        app.clone(),
        "POST",
        &format!("/{slug}"),
        Some(document_body(display_name)),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED, "{body}");
    body
}
