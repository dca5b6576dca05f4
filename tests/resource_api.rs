//! HTTP-level tests for the resource routes, run against the in-memory store.

mod common;

use axum::body::Body;
use chrono::{DateTime, Utc};
use axum::http::{Request, StatusCode};
use common::{memory_app, send, send_request, FailingStore, VanishingStore};
use resource_api::{app, AppState, InMemoryStore, ResourceStore};
use serde_json::{json, Value};
use std::sync::Arc;

async fn create(app: &axum::Router, body: Value) -> Value {
    let (status, created) = send(app, "POST", "/api/resources", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", created);
    created
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .expect("timestamp must be a string")
        .parse()
        .expect("timestamp must be RFC 3339")
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("list body must be an array")
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_defaults_status_and_generates_fields() {
    let (app, _) = memory_app();
    let created = create(&app, json!({ "name": "Sample Resource", "category": "technology" })).await;

    assert_eq!(created["name"], "Sample Resource");
    assert_eq!(created["category"], "technology");
    assert_eq!(created["status"], "active");
    assert!(created["description"].is_null());
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());
}

#[tokio::test]
async fn create_keeps_supplied_status() {
    let (app, _) = memory_app();
    let created = create(&app, json!({ "name": "Dormant", "status": "inactive" })).await;
    assert_eq!(created["status"], "inactive");
}

#[tokio::test]
async fn create_without_name_is_rejected_and_not_persisted() {
    let (app, store) = memory_app();

    let (status, body) = send(&app, "POST", "/api/resources", Some(json!({ "description": "no name" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name is required" }));

    let (status, body) = send(&app, "POST", "/api/resources", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name is required" }));

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_with_unknown_status_is_bad_request() {
    let (app, store) = memory_app();
    let (status, body) = send(&app, "POST", "/api/resources", Some(json!({ "name": "x", "status": "archived" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, _) = memory_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/resources")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn oversized_body_is_413_with_error_shape() {
    let (app, store) = memory_app();
    let body = json!({ "name": "A", "description": "x".repeat(2 * 1024 * 1024) });
    let request = Request::builder()
        .method("POST")
        .uri("/api/resources")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn unsupported_method_is_405_with_error_shape() {
    let (app, _) = memory_app();
    let (status, body) = send(&app, "PATCH", "/api/resources/some-id", Some(json!({ "name": "A" }))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn get_returns_created_resource() {
    let (app, _) = memory_app();
    let created = create(&app, json!({ "name": "A", "description": "first" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/resources/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_without_filters_is_newest_first() {
    let (app, _) = memory_app();
    let a = create(&app, json!({ "name": "A" })).await;
    let b = create(&app, json!({ "name": "B" })).await;
    let c = create(&app, json!({ "name": "C" })).await;

    let (status, list) = send(&app, "GET", "/api/resources", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&list),
        vec![
            c["id"].as_str().unwrap().to_string(),
            b["id"].as_str().unwrap().to_string(),
            a["id"].as_str().unwrap().to_string(),
        ]
    );
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
    let (app, _) = memory_app();
    let (status, list) = send(&app, "GET", "/api/resources", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn list_filters_by_exact_category() {
    let (app, _) = memory_app();
    let tech = create(&app, json!({ "name": "T", "category": "technology" })).await;
    create(&app, json!({ "name": "S", "category": "science" })).await;
    create(&app, json!({ "name": "P", "category": "tech" })).await;
    create(&app, json!({ "name": "N" })).await;

    let (status, list) = send(&app, "GET", "/api/resources?category=technology", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), vec![tech["id"].as_str().unwrap().to_string()]);
}

#[tokio::test]
async fn list_search_matches_name_or_description() {
    let (app, _) = memory_app();
    let by_name = create(&app, json!({ "name": "a sample item" })).await;
    let by_description = create(&app, json!({ "name": "other", "description": "holds a sample" })).await;
    create(&app, json!({ "name": "unrelated", "description": "nothing here" })).await;
    create(&app, json!({ "name": "Sample Capitalised" })).await;

    let (status, list) = send(&app, "GET", "/api/resources?search=sample", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&list),
        vec![
            by_description["id"].as_str().unwrap().to_string(),
            by_name["id"].as_str().unwrap().to_string(),
        ]
    );
}

#[tokio::test]
async fn list_filters_combine_with_and() {
    let (app, _) = memory_app();
    let hit = create(&app, json!({ "name": "sample one", "category": "technology", "status": "inactive" })).await;
    create(&app, json!({ "name": "sample two", "category": "technology" })).await;
    create(&app, json!({ "name": "sample three", "category": "science", "status": "inactive" })).await;

    let (status, list) = send(
        &app,
        "GET",
        "/api/resources?category=technology&status=inactive&search=sample",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), vec![hit["id"].as_str().unwrap().to_string()]);
}

#[tokio::test]
async fn list_with_empty_filter_values_applies_nothing() {
    let (app, _) = memory_app();
    create(&app, json!({ "name": "A", "category": "technology" })).await;
    create(&app, json!({ "name": "B" })).await;

    let (status, list) = send(&app, "GET", "/api/resources?category=&search=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_with_unknown_status_matches_nothing() {
    let (app, _) = memory_app();
    create(&app, json!({ "name": "A" })).await;
    let (status, body) = send(&app, "GET", "/api/resources?status=archived", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let (app, _) = memory_app();
    let created = create(
        &app,
        json!({ "name": "Sample Resource", "description": "d", "category": "technology" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/resources/{}", id),
        Some(json!({ "status": "inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "inactive");
    for field in ["id", "name", "description", "category", "createdAt"] {
        assert_eq!(updated[field], created[field], "{} changed", field);
    }
    assert!(timestamp(&updated["updatedAt"]) > timestamp(&created["updatedAt"]));

    let (_, fetched) = send(&app, "GET", &format!("/api/resources/{}", id), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn empty_update_still_refreshes_updated_at() {
    let (app, _) = memory_app();
    let created = create(&app, json!({ "name": "A", "category": "c" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(&app, "PUT", &format!("/api/resources/{}", id), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "A");
    assert_eq!(updated["category"], "c");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(timestamp(&updated["updatedAt"]) > timestamp(&created["updatedAt"]));
}

#[tokio::test]
async fn update_with_null_clears_optional_field() {
    let (app, _) = memory_app();
    let created = create(&app, json!({ "name": "A", "description": "d", "category": "c" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/resources/{}", id),
        Some(json!({ "description": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["description"].is_null());
    assert_eq!(updated["category"], "c");
}

#[tokio::test]
async fn update_with_empty_name_is_rejected() {
    let (app, _) = memory_app();
    let created = create(&app, json!({ "name": "A" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, "PUT", &format!("/api/resources/{}", id), Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name cannot be empty" }));
}

#[tokio::test]
async fn missing_ids_are_404() {
    let (app, _) = memory_app();
    let not_found = json!({ "error": "Resource not found" });

    let (status, body) = send(&app, "GET", "/api/resources/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/resources/does-not-exist",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let (status, body) = send(&app, "DELETE", "/api/resources/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let (app, store) = memory_app();
    let created = create(&app, json!({ "name": "A" })).await;
    let uri = format!("/api/resources/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert!(store.is_empty().await);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_filter_delete_scenario() {
    let (app, _) = memory_app();
    let created = create(&app, json!({ "name": "Sample Resource", "category": "technology" })).await;
    assert_eq!(created["status"], "active");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, list) = send(&app, "GET", "/api/resources?category=technology", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&list).contains(&id));

    let (status, _) = send(&app, "DELETE", &format!("/api/resources/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/resources/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Resource not found" }));
}

#[tokio::test]
async fn store_failures_are_500_without_detail() {
    let app = app(AppState::new(Arc::new(FailingStore)));
    let internal = json!({ "error": "Internal server error" });

    let cases: Vec<(&str, &str, Option<Value>)> = vec![
        ("POST", "/api/resources", Some(json!({ "name": "A" }))),
        ("GET", "/api/resources", None),
        ("GET", "/api/resources/x", None),
        ("PUT", "/api/resources/x", Some(json!({ "name": "B" }))),
        ("DELETE", "/api/resources/x", None),
    ];
    for (method, uri, body) in cases {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(response, internal);
    }
}

#[tokio::test]
async fn row_vanishing_after_check_is_404() {
    let store = Arc::new(VanishingStore {
        inner: InMemoryStore::new(),
    });
    let app = app(AppState::new(store.clone()));
    let created = create(&app, json!({ "name": "A" })).await;
    let uri = format!("/api/resources/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "name": "B" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(store.find(created["id"].as_str().unwrap()).await.unwrap().is_some());
}
