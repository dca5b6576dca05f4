//! Response helpers. Resources are returned bare, errors as `{"error": "..."}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Error envelope used by every failing response.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    #[schema(example = "Resource not found")]
    pub error: String,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn error_body(message: impl Into<String>) -> serde_json::Value {
    serde_json::json!({ "error": message.into() })
}
