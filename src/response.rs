//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct SuccessCount {
    pub success: bool,
    pub count: i64,
}

#[derive(Serialize)]
pub struct SuccessMessage {
    pub success: bool,
    pub message: &'static str,
}

pub fn success_created<T: Serialize>(data: T, message: &'static str) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::CREATED,
        Json(SuccessOne {
            success: true,
            data,
            message: Some(message),
        }),
    )
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            success: true,
            data,
            message: None,
        }),
    )
}

pub fn success_one_with_message<T: Serialize>(
    data: T,
    message: &'static str,
) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            success: true,
            data,
            message: Some(message),
        }),
    )
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len();
    (
        StatusCode::OK,
        Json(SuccessMany {
            success: true,
            data,
            count,
        }),
    )
}

pub fn success_count(count: i64) -> (StatusCode, Json<SuccessCount>) {
    (StatusCode::OK, Json(SuccessCount { success: true, count }))
}

pub fn success_message(message: &'static str) -> (StatusCode, Json<SuccessMessage>) {
    (
        StatusCode::OK,
        Json(SuccessMessage {
            success: true,
            message,
        }),
    )
}
