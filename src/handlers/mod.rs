//! HTTP handlers.

pub mod customer;
pub use customer::*;
