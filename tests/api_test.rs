//! End-to-end requests against the full router backed by the in-memory store.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use resource_api::{app, AppState, MemoryResourceStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router() -> Router {
    app(AppState::new(Arc::new(MemoryResourceStore::new())), 1024 * 1024)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, value) = send(app, Method::POST, "/api/resources", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{value}");
    value["data"].clone()
}

#[tokio::test]
async fn create_then_fetch_sample_resource() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/resources",
        Some(json!({"name": "Sample Resource 1", "category": "sample", "status": "active"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Resource created successfully");
    let id = body["data"]["id"].as_i64().unwrap();
    assert!(id > 0);
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"]["updatedAt"].is_string());

    let (status, fetched) = send(&app, Method::GET, &format!("/api/resources/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["success"], true);
    assert_eq!(fetched["data"]["name"], "Sample Resource 1");
    assert_eq!(fetched["data"]["category"], "sample");
    assert_eq!(fetched["data"]["status"], "active");
    assert_eq!(fetched["data"], body["data"]);
}

#[tokio::test]
async fn short_name_is_rejected() {
    let app = router();
    let (status, body) = send(&app, Method::POST, "/api/resources", Some(json!({"name": "ab"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "message": "Name must be at least 3 characters long"})
    );
}

#[tokio::test]
async fn missing_name_is_rejected() {
    let app = router();
    let (status, body) = send(&app, Method::POST, "/api/resources", Some(json!({"category": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name is required");
}

#[tokio::test]
async fn malformed_or_unknown_fields_are_bad_requests() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/resources",
        Some(json!({"name": "Valid name", "owner": "someone"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, Method::POST, "/api/resources", Some(json!({"name": 42}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = router();
    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/api/resources/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "message": "Invalid resource ID"}));
    }
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/resources/abc",
        Some(json!({"name": "Whatever"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid resource ID");
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = router();
    let (status, body) = send(&app, Method::DELETE, "/api/resources/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Resource with id 12345 not found");

    let (status, _) = send(&app, Method::GET, "/api/resources/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/resources/12345",
        Some(json!({"status": "inactive"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_flow() {
    let app = router();
    let created = create(&app, json!({"name": "Before", "description": "text"})).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/resources/{id}"),
        Some(json!({"name": "After", "description": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Resource updated successfully");
    assert_eq!(body["data"]["name"], "After");
    assert!(body["data"]["description"].is_null());
    assert_eq!(body["data"]["status"], "active");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/resources/{id}"),
        Some(json!({"name": "y".repeat(101)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name must not exceed 100 characters");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/resources/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Resource deleted successfully"}));

    let (status, _) = send(&app, Method::GET, &format!("/api/resources/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_and_count_apply_filters() {
    let app = router();
    create(&app, json!({"name": "Sample Resource 1", "category": "sample", "status": "active"})).await;
    create(&app, json!({"name": "Sample Resource 2", "category": "example", "status": "active"})).await;
    create(&app, json!({"name": "Old thing", "category": "sample", "status": "archived"})).await;

    let (status, body) = send(&app, Method::GET, "/api/resources", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = send(&app, Method::GET, "/api/resources?category=sample", None).await;
    assert_eq!(body["count"], 2);
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["category"] == "sample"));

    let (_, body) = send(&app, Method::GET, "/api/resources?category=sample&status=active", None).await;
    assert_eq!(body["count"], 1);

    let (_, body) = send(&app, Method::GET, "/api/resources?search=resource&status=", None).await;
    assert_eq!(body["count"], 2);

    let (status, body) = send(&app, Method::GET, "/api/resources/count?status=active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "count": 2}));

    let (_, body) = send(&app, Method::GET, "/api/resources/count", None).await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn search_endpoint_requires_term() {
    let app = router();
    create(&app, json!({"name": "Findable"})).await;

    let (status, body) = send(&app, Method::GET, "/api/resources/search?term=FIND", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, body) = send(&app, Method::GET, "/api/resources/search?term=%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search term is required");
}

#[tokio::test]
async fn root_and_probes() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["resources"], "/api/resources");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn unmatched_route_is_enveloped_404() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/api/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Route GET /api/nothing not found"}));
}

#[tokio::test]
async fn unsupported_method_is_enveloped_405() {
    let app = router();
    let (status, body) = send(&app, Method::PATCH, "/api/resources/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body,
        json!({"success": false, "message": "Method PATCH not allowed on /api/resources/1"})
    );
}

#[tokio::test]
async fn oversized_body_is_enveloped_413() {
    let app = app(AppState::new(Arc::new(MemoryResourceStore::new())), 64);
    let oversized = json!({"name": "n".repeat(200)});

    let (status, body) = send(&app, Method::POST, "/api/resources", Some(oversized.clone())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({"success": false, "message": "Request body too large"}));

    let payload = oversized.to_string();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/resources")
        .header("content-type", "application/json")
        .header("content-length", payload.len())
        .body(Body::from(payload))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"success": false, "message": "Request body too large"}));
}

#[tokio::test]
async fn undecodable_path_segment_is_enveloped_400() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/api/resources/%FF", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("UTF-8"), "{body}");
}

#[tokio::test]
async fn padded_overlong_name_is_rejected() {
    let app = router();
    let name = format!("  {}  ", "y".repeat(100));
    let (status, body) = send(&app, Method::POST, "/api/resources", Some(json!({"name": name}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "message": "Name must not exceed 100 characters"})
    );
}
