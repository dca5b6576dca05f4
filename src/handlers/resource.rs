//! Resource CRUD handlers: create, list, read, update, delete.

use crate::error::AppError;
use crate::model::{CreateResource, Resource, ResourceFilter, UpdateResource};
use crate::response::{created, ok, ErrorBody};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    post,
    path = "/api/resources",
    tag = "Resources",
    request_body = CreateResource,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 400, description = "Name is required or body is malformed", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateResource>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let data = RequestValidator::validate_create(body)?;
    let resource = state.resources.create(data).await?;
    Ok(created(resource))
}

#[utoipa::path(
    get,
    path = "/api/resources",
    tag = "Resources",
    params(ResourceFilter),
    responses(
        (status = 200, description = "Resources, newest first", body = Vec<Resource>),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ResourceFilter>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let filter = RequestValidator::validate_filter(params);
    let resources = state.resources.list(&filter).await?;
    Ok(ok(resources))
}

#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    tag = "Resources",
    params(("id" = String, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource found", body = Resource),
        (status = 404, description = "Resource not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resources.get_by_id(&id).await?.ok_or(AppError::NotFound)?;
    Ok(ok(resource))
}

/// Existence is checked before the write; a row deleted in between still ends as 404.
#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    tag = "Resources",
    params(("id" = String, Path, description = "Resource ID")),
    request_body = UpdateResource,
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "Resource not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateResource>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    RequestValidator::validate_update(&body)?;
    state.resources.get_by_id(&id).await?.ok_or(AppError::NotFound)?;
    let resource = state.resources.update(&id, &body).await?.ok_or(AppError::NotFound)?;
    Ok(ok(resource))
}

#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    tag = "Resources",
    params(("id" = String, Path, description = "Resource ID")),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 404, description = "Resource not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.resources.get_by_id(&id).await?.ok_or(AppError::NotFound)?;
    state.resources.delete(&id).await?.ok_or(AppError::NotFound)?;
    Ok(StatusCode::NO_CONTENT)
}
