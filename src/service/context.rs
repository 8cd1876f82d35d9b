//! Persistence context for the `Customers` table.
//!
//! Every mutating call is one unit of work: it opens a transaction, applies
//! its changes and commits, so a failed call leaves the table untouched.

use crate::error::AppError;
use crate::model::{Customer, NamePrefix, NameSuffix};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

const CUSTOMER_SELECT_SQL: &str = "SELECT Id, Prefix, Suffix, FirstName, MiddleName, LastName, Email, PhoneNumber FROM Customers";

const CUSTOMER_INSERT_SQL: &str = "INSERT INTO Customers (Prefix, Suffix, FirstName, MiddleName, LastName, Email, PhoneNumber) VALUES (?, ?, ?, ?, ?, ?, ?)";

const CUSTOMER_UPDATE_SQL: &str = "UPDATE Customers SET Prefix = ?, Suffix = ?, FirstName = ?, MiddleName = ?, LastName = ?, Email = ?, PhoneNumber = ? WHERE Id = ?";

#[async_trait]
pub trait CustomerContext: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;

    /// Exact match. Emails are not unique; the lowest id wins.
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError>;

    /// Persist one customer and return it with its assigned id.
    async fn insert(&self, customer: Customer) -> Result<Customer, AppError>;

    /// Persist all customers in one transaction, or none of them.
    async fn insert_batch(&self, customers: Vec<Customer>) -> Result<Vec<Customer>, AppError>;

    /// Overwrite every field of the record with `customer.id`. `NotFound` if missing.
    async fn update(&self, customer: &Customer) -> Result<(), AppError>;

    /// Remove the record matching `customer.id`. Missing records are a no-op.
    async fn delete_entity(&self, customer: &Customer) -> Result<(), AppError>;

    /// Remove the record with `id`. `NotFound` if missing.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

pub struct SqliteCustomerContext {
    pool: SqlitePool,
}

impl SqliteCustomerContext {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCustomerContext { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn insert_tx(tx: &mut Transaction<'_, Sqlite>, mut customer: Customer) -> Result<Customer, AppError> {
        tracing::debug!(sql = %CUSTOMER_INSERT_SQL, "query");
        let result = sqlx::query(CUSTOMER_INSERT_SQL)
            .bind(customer.prefix.map(|p| p.as_str()))
            .bind(customer.suffix.map(|s| s.as_str()))
            .bind(&customer.first_name)
            .bind(&customer.middle_name)
            .bind(&customer.last_name)
            .bind(&customer.email)
            .bind(&customer.phone_number)
            .execute(&mut **tx)
            .await?;
        customer.id = result.last_insert_rowid();
        Ok(customer)
    }
}

#[async_trait]
impl CustomerContext for SqliteCustomerContext {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let sql = format!("{} ORDER BY Id", CUSTOMER_SELECT_SQL);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(customer_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let sql = format!("{} WHERE Id = ?", CUSTOMER_SELECT_SQL);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(customer_from_row).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        let sql = format!("{} WHERE Email = ? ORDER BY Id LIMIT 1", CUSTOMER_SELECT_SQL);
        tracing::debug!(sql = %sql, email, "query");
        let row = sqlx::query(&sql).bind(email).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(customer_from_row).transpose()?)
    }

    async fn insert(&self, customer: Customer) -> Result<Customer, AppError> {
        let mut tx = self.pool.begin().await?;
        let created = Self::insert_tx(&mut tx, customer).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn insert_batch(&self, customers: Vec<Customer>) -> Result<Vec<Customer>, AppError> {
        let mut out = Vec::with_capacity(customers.len());
        let mut tx = self.pool.begin().await?;
        for customer in customers {
            out.push(Self::insert_tx(&mut tx, customer).await?);
        }
        tx.commit().await?;
        Ok(out)
    }

    async fn update(&self, customer: &Customer) -> Result<(), AppError> {
        // No read before the write: SQLite cannot upgrade a read lock while another writer is active.
        let mut tx = self.pool.begin().await?;
        tracing::debug!(sql = %CUSTOMER_UPDATE_SQL, id = customer.id, "query");
        let result = sqlx::query(CUSTOMER_UPDATE_SQL)
            .bind(customer.prefix.map(|p| p.as_str()))
            .bind(customer.suffix.map(|s| s.as_str()))
            .bind(&customer.first_name)
            .bind(&customer.middle_name)
            .bind(&customer.last_name)
            .bind(&customer.email)
            .bind(&customer.phone_number)
            .bind(customer.id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::customer_not_found(customer.id));
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_entity(&self, customer: &Customer) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM Customers WHERE Id = ?")
            .bind(customer.id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tracing::debug!(id = customer.id, "delete skipped, no matching customer");
            return Ok(());
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let customer = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::customer_not_found(id))?;
        self.delete_entity(&customer).await
    }
}

fn customer_from_row(row: &SqliteRow) -> Result<Customer, sqlx::Error> {
    let prefix: Option<String> = row.try_get("Prefix")?;
    let suffix: Option<String> = row.try_get("Suffix")?;
    Ok(Customer {
        id: row.try_get("Id")?,
        prefix: prefix
            .map(|p| p.parse::<NamePrefix>())
            .transpose()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        suffix: suffix
            .map(|s| s.parse::<NameSuffix>())
            .transpose()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        first_name: row.try_get("FirstName")?,
        middle_name: row.try_get("MiddleName")?,
        last_name: row.try_get("LastName")?,
        email: row.try_get("Email")?,
        phone_number: row.try_get("PhoneNumber")?,
    })
}
