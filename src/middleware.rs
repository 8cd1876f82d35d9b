//! Catch-all error handling composed around the router.

use crate::response::{internal_error_response, InternalFailure};
use crate::settings::Settings;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::sync::Arc;

/// Log every internal failure and render the final 500 body, exposing the
/// failure message only when `expose_error_details` is set.
pub async fn handle_internal_failures(
    State(settings): State<Arc<Settings>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    let failure = response.extensions().get::<InternalFailure>().cloned();
    let Some(InternalFailure(message)) = failure else {
        return response;
    };
    tracing::error!(%method, %uri, error = %message, "an unhandled error occurred");
    internal_error_response(settings.expose_error_details.then_some(message))
}

/// Panic handler for `CatchPanicLayer`; the result flows through `handle_internal_failures`.
pub fn panic_to_failure(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    InternalFailure(format!("panic: {}", message)).into_response()
}
