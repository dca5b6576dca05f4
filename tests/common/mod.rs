//! Shared harness: build the router over a store and drive it with `oneshot`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use resource_api::{
    app, AppError, AppState, InMemoryStore, ListFilter, NewResource, Resource, ResourceStore, UpdateResource,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn memory_app() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    (app(AppState::new(store.clone())), store)
}

/// Send a request and return the status plus parsed JSON body (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Store whose every call fails, for the 500 path.
pub struct FailingStore;

fn failure() -> AppError {
    AppError::Db(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ResourceStore for FailingStore {
    async fn insert(&self, _data: NewResource) -> Result<Resource, AppError> {
        Err(failure())
    }

    async fn list(&self, _filter: &ListFilter) -> Result<Vec<Resource>, AppError> {
        Err(failure())
    }

    async fn find(&self, _id: &str) -> Result<Option<Resource>, AppError> {
        Err(failure())
    }

    async fn update(&self, _id: &str, _changes: &UpdateResource) -> Result<Option<Resource>, AppError> {
        Err(failure())
    }

    async fn delete(&self, _id: &str) -> Result<Option<Resource>, AppError> {
        Err(failure())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(failure())
    }
}

/// Store that reports every row as present on lookup but gone on write,
/// mimicking a delete that lands between the existence check and the mutation.
pub struct VanishingStore {
    pub inner: InMemoryStore,
}

#[async_trait]
impl ResourceStore for VanishingStore {
    async fn insert(&self, data: NewResource) -> Result<Resource, AppError> {
        self.inner.insert(data).await
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Resource>, AppError> {
        self.inner.list(filter).await
    }

    async fn find(&self, id: &str) -> Result<Option<Resource>, AppError> {
        self.inner.find(id).await
    }

    async fn update(&self, _id: &str, _changes: &UpdateResource) -> Result<Option<Resource>, AppError> {
        Ok(None)
    }

    async fn delete(&self, _id: &str) -> Result<Option<Resource>, AppError> {
        Ok(None)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
