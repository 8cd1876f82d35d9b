//! Router assembly: operational routes, customer routes and the middleware stack.

mod common;
mod customer;

pub use common::common_routes;
pub use customer::customer_routes;

use crate::middleware::{handle_internal_failures, panic_to_failure};
use crate::settings::Settings;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

pub const API_PREFIX: &str = "/api";

/// The full application: `/health`, `/ready`, `/version` and `/api/customers/...`.
pub fn build_router(state: AppState) -> Router {
    let settings = state.settings.clone();
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, customer_routes(state));
    with_middleware(router, settings)
}

/// Wrap `router` with panic catching, the catch-all error handler, the body
/// size limit and request tracing (outermost last).
pub fn with_middleware(router: Router, settings: Arc<Settings>) -> Router {
    let body_limit = settings.body_limit_bytes;
    router
        .layer(CatchPanicLayer::custom(panic_to_failure))
        .layer(axum::middleware::from_fn_with_state(settings, handle_internal_failures))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
