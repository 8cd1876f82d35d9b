//! JSON body extractors. Rejections are rendered as `{succeeded: false, errors: [...]}`
//! before the handler runs.

use crate::response::ValidationErrorBody;
use crate::service::{validate_model, RequestModel};
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

/// Raw JSON body, for handlers that inspect the payload before validating it.
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "rejected request body");
                let status = match rejection {
                    JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
                    ref other => other.status(),
                };
                Err((status, Json(ValidationErrorBody::new(vec![rejection.body_text()]))).into_response())
            }
        }
    }
}

/// JSON body that passed field validation and deserialized into `T`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RequestModel + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::from_request(req, state).await?;
        validate_model(value).map(ValidatedJson).map_err(|err| {
            tracing::warn!(error = %err, "model state is invalid");
            err.into_response()
        })
    }
}
