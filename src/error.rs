//! Typed errors and HTTP mapping.

use crate::response::ErrorBody;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message sent for every 404 on the resource routes.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";

/// Message sent for every 500; the cause stays in the server log.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("unknown store backend: {0} (expected postgres or memory)")]
    UnknownBackend(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match status {
            StatusCode::NOT_FOUND => NOT_FOUND_MESSAGE.to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "request failed");
                INTERNAL_MESSAGE.to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
