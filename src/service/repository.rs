//! Repository between the HTTP handlers and the persistence context.

use crate::error::AppError;
use crate::model::Customer;
use crate::service::context::CustomerContext;
use std::sync::Arc;

#[derive(Clone)]
pub struct CustomerRepository {
    context: Arc<dyn CustomerContext>,
}

impl CustomerRepository {
    pub fn new(context: Arc<dyn CustomerContext>) -> Self {
        CustomerRepository { context }
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>, AppError> {
        tracing::info!("retrieving all customers");
        self.context.find_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Customer>, AppError> {
        tracing::info!(id, "retrieving customer");
        self.context.find_by_id(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        tracing::info!(email, "retrieving customer by email");
        self.context.find_by_email(email).await
    }

    pub async fn create(&self, customer: Customer) -> Result<Customer, AppError> {
        tracing::info!("creating customer");
        self.context.insert(customer).await
    }

    pub async fn create_many(&self, customers: Vec<Customer>) -> Result<Vec<Customer>, AppError> {
        tracing::info!(count = customers.len(), "creating customers");
        self.context.insert_batch(customers).await
    }

    pub async fn update(&self, customer: &Customer) -> Result<(), AppError> {
        tracing::info!(id = customer.id, "updating customer");
        self.context.update(customer).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        tracing::info!(id, "deleting customer");
        self.context.delete_by_id(id).await
    }
}
