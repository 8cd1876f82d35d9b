//! Persistence context, repository and request validation.

mod context;
mod repository;
mod validation;
pub use context::{CustomerContext, SqliteCustomerContext};
pub use repository::CustomerRepository;
pub use validation::{validate_model, FieldRule, RequestModel, RequestValidator, CUSTOMER_RULES, NAME_MAX_LENGTH};
