#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use docs_service::config::{DocsConfig, DEFAULT_APP_NAME};
use docs_service::services::{DocumentStore, MemoryStore, MongoStore};
use docs_service::{build_router, AppState};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Nothing listens on port 1; the short timeouts make the probe fail fast.
pub const UNREACHABLE_MONGODB_URI: &str =
    "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=300&connectTimeoutMS=300";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn DocumentStore>,
}

impl TestApp {
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub async fn unreachable_mongo() -> Self {
        let store = MongoStore::connect(UNREACHABLE_MONGODB_URI, Some("docs_unreachable"))
            .await
            .expect("Connection string should parse without contacting the server");
        Self::with_store(Arc::new(store))
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        let state = AppState::new(DocsConfig::in_memory(DEFAULT_APP_NAME), store.clone());
        Self {
            router: build_router(state),
            store,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Bytes) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .expect("Router should always produce a response");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();
        (status, bytes)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Bytes) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, json: &str) -> (StatusCode, Bytes) {
        self.request(Method::POST, uri, Some(json)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Bytes) {
        self.request(Method::DELETE, uri, None).await
    }
}

pub fn json(bytes: &Bytes) -> serde_json::Value {
    serde_json::from_slice(bytes).expect("Failed to parse JSON")
}
