//! Shared helpers for customer-service integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use customer_service::{
    build_router,
    config::{CustomerConfig, Environment, MongoConfig, SwaggerConfig},
    services::{CustomerRepository, InMemoryCustomerRepository, MongoCustomerRepository},
    startup::Application,
    AppState,
};
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

pub fn test_config() -> CustomerConfig {
    CustomerConfig {
        common: CoreConfig { port: 0 },
        environment: Environment::Dev,
        service_name: "customer-service-test".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGO_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("customer_test_{}", Uuid::new_v4().simple()),
        },
        swagger: SwaggerConfig { enabled: true },
    }
}

pub fn sample_customer() -> Value {
    json!({
        "firstName": "Test",
        "lastName": "Testt",
        "email": "Test.Testt@darkside.moon",
        "street": "Teststraße 1",
        "city": "Teststadt",
        "zip": "11111"
    })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestResponse {
    /// Identifier from the `Location` header of a 201 response.
    pub fn created_id(&self) -> String {
        self.location
            .as_deref()
            .and_then(|l| l.strip_prefix("/customers/"))
            .expect("missing Location header")
            .to_string()
    }
}

/// Router over an in-memory repository, driven with `oneshot`.
pub struct MemoryApp {
    pub router: Router,
    pub repository: InMemoryCustomerRepository,
}

impl MemoryApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: CustomerConfig) -> Self {
        let repository = InMemoryCustomerRepository::new();
        let state = AppState {
            config,
            repository: Arc::new(repository.clone()) as Arc<dyn CustomerRepository>,
        };

        Self {
            router: build_router(state),
            repository,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => Request::builder().method(method).uri(uri).body(Body::empty()),
        }
        .unwrap();

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            location,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates a customer and returns its identifier.
    pub async fn create(&self, body: Value) -> String {
        let response = self.post("/customers", body).await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.created_id()
    }
}

/// Full server against a real MongoDB on a random port with a throwaway database.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: MongoCustomerRepository,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = test_config();
        let db_name = config.mongodb.database.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let repository = app.repository().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            repository,
            db_name,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.repository.database().drop(None).await;
    }
}
