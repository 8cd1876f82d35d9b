//! Liveness, readiness and build info endpoints.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

const BUILD: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

#[derive(Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Check {
    Ok,
    Unavailable,
}

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: Check,
    #[serde(skip_serializing_if = "Option::is_none")]
    customers: Option<i64>,
}

async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "version": BUILD.version }))
}

/// Ready once the `Customers` table answers a count; 503 otherwise.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Customers")
        .fetch_one(&state.pool)
        .await;
    match count {
        Ok(customers) => (
            StatusCode::OK,
            Json(Readiness { status: "ok", database: Check::Ok, customers: Some(customers) }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "customers table not reachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness { status: "degraded", database: Check::Unavailable, customers: None }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BUILD)
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(build_info))
        .with_state(state)
}
