//! Customer API: CRUD REST backend for customer records on SQLite.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use model::{Customer, NamePrefix, NameSuffix};
pub use routes::{build_router, with_middleware, API_PREFIX};
pub use service::{CustomerContext, CustomerRepository, SqliteCustomerContext};
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, connect_in_memory, ensure_customers_table};
