use super::repository::{parse_id, CustomerRepository, RepositoryError};
use crate::models::Customer;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Vector-backed repository for tests and local runs without MongoDB.
///
/// Follows the same contract as the MongoDB repository, including identifier
/// parsing, so handler behaviour does not depend on the backend.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<Vec<Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self.customers.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, RepositoryError> {
        let oid = parse_id(id)?;
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.id == Some(oid)).cloned())
    }

    async fn insert(&self, mut customer: Customer) -> Result<ObjectId, RepositoryError> {
        let id = *customer.id.get_or_insert_with(ObjectId::new);
        let mut customers = self.customers.write().await;
        if customers.iter().any(|c| c.id == Some(id)) {
            return Err(RepositoryError::DuplicateIdentifier(id));
        }
        customers.push(customer);
        Ok(id)
    }

    async fn update(&self, id: &str, customer: &Customer) -> Result<(), RepositoryError> {
        let oid = parse_id(id)?;
        let mut customers = self.customers.write().await;
        if let Some(stored) = customers.iter_mut().find(|c| c.id == Some(oid)) {
            stored.overwrite_fields(customer);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let oid = parse_id(id)?;
        self.customers.write().await.retain(|c| c.id != Some(oid));
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
