//! Route table and the assembled application router.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::response::error_body;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Base path of the resource API.
pub const RESOURCES_PATH: &str = "/api/resources";

/// Maximum accepted request body (1 MiB). Oversized JSON bodies surface as a 413 `JsonRejection`.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(error_body("Route not found")))
}

/// Rewrite the router's bodiless 405 into the `{"error": ...}` shape, keeping `Allow`.
async fn method_not_allowed_json(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = (StatusCode::METHOD_NOT_ALLOWED, Json(error_body("Method not allowed"))).into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}

/// Full application: common routes, resource routes, body limit and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(RESOURCES_PATH, resource_routes(state))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(map_response(method_not_allowed_json))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
}
