//! Customer CRUD handlers: list, read, read by email, create, bulk create, update, delete.

use crate::error::AppError;
use crate::extractors::{JsonBody, ValidatedJson};
use crate::model::Customer;
use crate::response;
use crate::routes::API_PREFIX;
use crate::service::validate_model;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    tracing::info!("getting all customers");
    let customers = state.repository.get_all().await?;
    tracing::info!(count = customers.len(), "retrieved customers");
    Ok(response::ok(customers))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    tracing::info!(id, "getting customer");
    match state.repository.get(id).await? {
        Some(customer) => Ok(response::ok(customer)),
        None => {
            tracing::warn!(id, "customer not found");
            Err(AppError::customer_not_found(id))
        }
    }
}

pub async fn read_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    tracing::info!(%email, "getting customer by email");
    match state.repository.get_by_email(&email).await? {
        Some(customer) => Ok(response::ok(customer)),
        None => {
            tracing::warn!(%email, "customer not found");
            Err(AppError::NotFound(format!("customer with email {}", email)))
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(customer): ValidatedJson<Customer>,
) -> Result<Response, AppError> {
    let created = state.repository.create(customer).await?;
    tracing::info!(id = created.id, "created customer");
    let location = format!("{}/customers/{}", API_PREFIX, created.id);
    Ok(response::created_at(location, created))
}

pub async fn bulk_create(
    State(state): State<AppState>,
    ValidatedJson(customers): ValidatedJson<Vec<Customer>>,
) -> Result<Response, AppError> {
    let created = state.repository.create_many(customers).await?;
    tracing::info!(count = created.len(), "created customers");
    Ok(response::created(created))
}

/// The path id must equal the body id; that is checked before the payload is validated.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    let body_id = body.get("id").and_then(Value::as_i64).unwrap_or_default();
    if body_id != id {
        tracing::warn!(id, body_id, "id mismatch for customer update");
        return Err(AppError::IdMismatch { path: id, body: body_id });
    }
    let customer: Customer = validate_model(body).inspect_err(|err| {
        tracing::warn!(error = %err, "model state is invalid");
    })?;
    if let Err(err) = state.repository.update(&customer).await {
        if matches!(err, AppError::NotFound(_)) {
            tracing::warn!(id, "customer not found for update");
        }
        return Err(err);
    }
    tracing::info!(id, "updated customer");
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    if let Err(err) = state.repository.delete(id).await {
        if matches!(err, AppError::NotFound(_)) {
            tracing::warn!(id, "customer not found for delete");
        }
        return Err(err);
    }
    tracing::info!(id, "deleted customer");
    Ok(StatusCode::NO_CONTENT.into_response())
}
