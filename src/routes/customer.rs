//! Customer CRUD routes, nested under `API_PREFIX` by `build_router`.

use crate::handlers::customer::{bulk_create, create, delete as delete_handler, list, read, read_by_email, update};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(list).post(create))
        .route("/customers/batch", post(bulk_create))
        .route("/customers/email/:email", get(read_by_email))
        .route("/customers/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
