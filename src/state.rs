//! Shared application state for all routes.

use crate::service::{CustomerContext, CustomerRepository, SqliteCustomerContext};
use crate::settings::Settings;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Used directly only by the readiness probe; customer access goes through `repository`.
    pub pool: SqlitePool,
    pub repository: CustomerRepository,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: Settings) -> Self {
        let context = Arc::new(SqliteCustomerContext::new(pool.clone()));
        Self::with_context(pool, context, settings)
    }

    /// Build state around a caller-supplied context (e.g. a stub in tests).
    pub fn with_context(pool: SqlitePool, context: Arc<dyn CustomerContext>, settings: Settings) -> Self {
        AppState {
            pool,
            repository: CustomerRepository::new(context),
            settings: Arc::new(settings),
        }
    }
}
