//! Resource CRUD handlers: create, list, count, search, read, update, delete.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::model::{CreateResource, ResourceFilter, UpdateResource};
use crate::response::{
    success_count, success_created, success_many, success_message, success_one,
    success_one_with_message,
};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid resource ID".into()))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateResource>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.resources.create(body).await?;
    Ok(success_created(row, "Resource created successfully"))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ResourceFilter::from_query(&params);
    let rows = state.resources.find_all(&filter).await?;
    Ok(success_many(rows))
}

pub async fn count(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ResourceFilter::from_query(&params);
    let n = state.resources.count(&filter).await?;
    Ok(success_count(n))
}

/// `GET /search?term=...`; `q` is accepted as a shorter alias.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let term = params
        .get("term")
        .or_else(|| params.get("q"))
        .map(String::as_str)
        .unwrap_or("");
    let rows = state.resources.search_by_name(term).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    ApiPath(id_str): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.resources.get_by_id(id).await?;
    Ok(success_one(row))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id_str): ApiPath<String>,
    ApiJson(body): ApiJson<UpdateResource>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.resources.update(id, body).await?;
    Ok(success_one_with_message(row, "Resource updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id_str): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.resources.delete(id).await?;
    Ok(success_message("Resource deleted successfully"))
}
