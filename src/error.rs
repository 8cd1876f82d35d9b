//! Typed errors and HTTP mapping.

use crate::response::{InternalFailure, ValidationErrorBody};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("id mismatch: path {path}, body {body}")]
    IdMismatch { path: i64, body: i64 },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn customer_not_found(id: i64) -> Self {
        AppError::NotFound(format!("customer {}", id))
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

fn error_body(status: StatusCode, code: &str, message: String) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: code.to_string(),
            message,
        },
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => ValidationErrorBody::new(errors).into_response(),
            AppError::IdMismatch { .. } => {
                ValidationErrorBody::new(vec!["Id mismatch".to_string()]).into_response()
            }
            AppError::NotFound(_) => {
                let message = self.to_string();
                error_body(StatusCode::NOT_FOUND, "not_found", message)
            }
            AppError::BadRequest(_) => {
                let message = self.to_string();
                error_body(StatusCode::BAD_REQUEST, "bad_request", message)
            }
            AppError::Db(_) | AppError::Internal(_) => InternalFailure(self.to_string()).into_response(),
        }
    }
}
