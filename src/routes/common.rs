//! Common routes: health, readiness, version, API document.

use crate::openapi::{ApiDoc, DOCS_PATH, OPENAPI_PATH};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Redirect, routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.resources.store().ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn docs_redirect() -> Redirect {
    Redirect::temporary(OPENAPI_PATH)
}

/// GET /health, /ready, /version, the OpenAPI document and `/api-docs` pointing at it.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route(OPENAPI_PATH, get(openapi_json))
        .route(DOCS_PATH, get(docs_redirect))
        .with_state(state)
}
