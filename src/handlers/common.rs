use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success envelope mirroring the error envelope in `errors.rs`.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub has_error: bool,
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

pub fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    let body = SuccessResponse {
        has_error: false,
        status_code: status.as_u16(),
        message: message.to_string(),
        data,
    };
    (status, Json(body)).into_response()
}

pub fn ok<T: Serialize>(message: &str, data: T) -> Response {
    success(StatusCode::OK, message, data)
}

pub fn created<T: Serialize>(message: &str, data: T) -> Response {
    success(StatusCode::CREATED, message, data)
}
