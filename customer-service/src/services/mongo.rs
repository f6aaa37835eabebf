use super::repository::{parse_id, CustomerRepository, RepositoryError};
use crate::models::Customer;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::FindOptions,
    Client as MongoClient, Collection, Database,
};

const CUSTOMERS_COLLECTION: &str = "customers";
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoCustomerRepository {
    client: MongoClient,
    db: Database,
}

impl MongoCustomerRepository {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, RepositoryError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            RepositoryError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub fn customers(&self) -> Collection<Customer> {
        self.db.collection(CUSTOMERS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl CustomerRepository for MongoCustomerRepository {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        // ObjectIds grow monotonically, so _id order is insertion order
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let cursor = self.customers().find(None, options).await.map_err(|e| {
            tracing::error!("Failed to query customers: {}", e);
            RepositoryError::from(e)
        })?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, RepositoryError> {
        let oid = parse_id(id)?;
        self.customers()
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(customer_id = %id, "Failed to find customer: {}", e);
                RepositoryError::from(e)
            })
    }

    async fn insert(&self, mut customer: Customer) -> Result<ObjectId, RepositoryError> {
        let id = *customer.id.get_or_insert_with(ObjectId::new);

        self.customers()
            .insert_one(&customer, None)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    RepositoryError::DuplicateIdentifier(id)
                } else {
                    tracing::error!(customer_id = %id, "Failed to insert customer: {}", e);
                    RepositoryError::from(e)
                }
            })?;

        Ok(id)
    }

    async fn update(&self, id: &str, customer: &Customer) -> Result<(), RepositoryError> {
        let oid = parse_id(id)?;
        let update = doc! {
            "$set": {
                "firstName": &customer.first_name,
                "lastName": &customer.last_name,
                "email": &customer.email,
                "street": &customer.street,
                "zip": &customer.zip,
                "city": &customer.city,
            }
        };

        self.customers()
            .update_one(doc! { "_id": oid }, update, None)
            .await
            .map_err(|e| {
                tracing::error!(customer_id = %id, "Failed to update customer: {}", e);
                RepositoryError::from(e)
            })?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let oid = parse_id(id)?;
        self.customers()
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(customer_id = %id, "Failed to delete customer: {}", e);
                RepositoryError::from(e)
            })?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                RepositoryError::from(e)
            })?;
        Ok(())
    }
}
