//! Common test utilities for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

use spycat::adapters::http::{build_router, AppState};
use spycat::adapters::sqlite::create_migrated_test_pool;
use spycat::domain::models::{Breed, MissionPolicy};
use spycat::domain::ports::{BreedCatalog, CatalogError};

/// Catalog with a fixed set of breeds.
pub struct StaticCatalog {
    breeds: Vec<Breed>,
}

impl StaticCatalog {
    pub fn with_breeds(ids: &[&str]) -> Self {
        Self {
            breeds: ids.iter().map(|id| Breed::new(*id, id.to_uppercase())).collect(),
        }
    }
}

#[async_trait]
impl BreedCatalog for StaticCatalog {
    async fn get_breed_by_id(&self, id: &str) -> Result<Breed, CatalogError> {
        self.breeds
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::BreedNotFound(id.to_string()))
    }
}

/// Initialize a test-writer subscriber; repeated calls are no-ops.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub async fn test_state(policy: MissionPolicy) -> (AppState, SqlitePool) {
    let pool = create_migrated_test_pool().await.expect("Failed to create test pool");
    let catalog = Arc::new(StaticCatalog::with_breeds(&["abys", "beng", "sphy"]));
    (AppState::new(pool.clone(), catalog, policy), pool)
}

/// In-memory agency behind the full router.
pub async fn test_app() -> (Router, SqlitePool) {
    let (state, pool) = test_state(MissionPolicy::default()).await;
    (build_router(state, false), pool)
}

/// Send one request through the router and decode the body as JSON
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn create_cat(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/cats",
        Some(serde_json::json!({
            "name": name,
            "breed": "abys",
            "yearsOfExperience": 3,
            "salary": 1500
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().expect("cat id")
}

pub async fn create_mission(app: &Router, target_names: &[&str]) -> Value {
    let targets: Vec<Value> = target_names
        .iter()
        .map(|name| serde_json::json!({ "name": name, "country": "UA", "notes": "" }))
        .collect();
    let (status, body) = send(
        app,
        Method::POST,
        "/missions",
        Some(serde_json::json!({ "targets": targets })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}
