//! Router assembly: common routes, resource routes, fallback and middleware.

mod common;
mod resource;

pub use common::common_routes_with_ready;
pub use resource::resource_routes;

use crate::error::ErrorBody;
use crate::state::AppState;
use axum::{
    extract::Request,
    http::{header, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Mount prefix for resource routes.
pub const RESOURCES_PATH: &str = "/api/resources";

/// Full application router.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest(RESOURCES_PATH, resource_routes(state))
        .fallback(route_not_found)
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(middleware::from_fn(envelope_errors))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(format!("Route {} {} not found", method, uri.path()))),
    )
}

/// Rewrites error responses produced outside the handlers (405 from method routing, 413
/// from the body limit, extractor rejections) into the JSON error envelope.
async fn envelope_errors(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }
    let message = match status {
        StatusCode::METHOD_NOT_ALLOWED => format!("Method {} not allowed on {}", method, path),
        StatusCode::PAYLOAD_TOO_LARGE => "Request body too large".to_string(),
        _ => status.canonical_reason().unwrap_or("Request failed").to_string(),
    };
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped = (status, Json(ErrorBody::new(message))).into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
