use crate::models::Customer;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Invalid customer id: {0}")]
    InvalidIdentifier(String),

    #[error("Customer id already exists: {0}")]
    DuplicateIdentifier(ObjectId),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // Malformed path identifiers are indistinguishable from unknown ones
            RepositoryError::InvalidIdentifier(_) => {
                AppError::NotFound(anyhow::anyhow!("Customer not found"))
            }
            RepositoryError::DuplicateIdentifier(id) => {
                AppError::Conflict(anyhow::anyhow!("Customer {} already exists", id))
            }
            RepositoryError::Database(e) => AppError::from(e),
        }
    }
}

/// Parses an identifier taken from a URL path.
pub fn parse_id(id: &str) -> Result<ObjectId, RepositoryError> {
    ObjectId::parse_str(id).map_err(|_| RepositoryError::InvalidIdentifier(id.to_string()))
}

/// Persistence operations over the customer collection.
///
/// `update` and `delete` are no-ops when nothing matches; callers check existence first.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers in insertion order.
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, RepositoryError>;

    /// Persists the customer, assigning an identifier when none is set, and returns it.
    async fn insert(&self, customer: Customer) -> Result<ObjectId, RepositoryError>;

    /// Overwrites the six business fields of the matching customer.
    async fn update(&self, id: &str, customer: &Customer) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    async fn health_check(&self) -> Result<(), RepositoryError>;
}
