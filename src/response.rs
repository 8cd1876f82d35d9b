//! Response bodies shared by handlers, extractors and middleware.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Body returned when a request payload fails validation.
#[derive(Debug, Serialize)]
pub struct ValidationErrorBody {
    pub succeeded: bool,
    pub errors: Vec<String>,
}

impl ValidationErrorBody {
    pub fn new(errors: Vec<String>) -> Self {
        ValidationErrorBody {
            succeeded: false,
            errors,
        }
    }
}

impl IntoResponse for ValidationErrorBody {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Body of every 500 response.
#[derive(Debug, Serialize)]
pub struct InternalErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Marker carried in response extensions so the error middleware can log the
/// failure and decide whether `details` is exposed.
#[derive(Clone, Debug)]
pub struct InternalFailure(pub String);

impl IntoResponse for InternalFailure {
    fn into_response(self) -> Response {
        let mut response = internal_error_response(None);
        response.extensions_mut().insert(self);
        response
    }
}

pub fn internal_error_response(details: Option<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorBody {
            error: "Internal Server Error",
            details,
        }),
    )
        .into_response()
}

/// 201 with the created entity and a `Location` header.
pub fn created_at<T: Serialize>(location: String, data: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(data)).into_response()
}

pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}
