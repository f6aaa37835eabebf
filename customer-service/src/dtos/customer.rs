use crate::models::{customer::zip_code, Customer};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /customers` and `PUT /customers/{id}`.
///
/// Fields are optional at the serde level so that a missing field surfaces as a
/// validation error (400) rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    /// Caller-chosen identifier (24 hex characters). Only honoured on create;
    /// any JSON value is accepted here so that PUT can ignore it.
    #[schema(value_type = Option<String>, example = "6484732eaec28b9bdd493338")]
    pub id: Option<serde_json::Value>,

    #[validate(
        required(message = "firstName must not be empty"),
        length(min = 1, message = "firstName must not be empty")
    )]
    #[schema(example = "John")]
    pub first_name: Option<String>,

    #[validate(
        required(message = "lastName must not be empty"),
        length(min = 1, message = "lastName must not be empty")
    )]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,

    #[validate(
        required(message = "email must not be empty"),
        length(min = 1, message = "email must not be empty")
    )]
    #[schema(example = "john.doe@skynet.org")]
    pub email: Option<String>,

    #[validate(
        required(message = "street must not be empty"),
        length(min = 1, message = "street must not be empty")
    )]
    #[schema(example = "Musterstraße 1")]
    pub street: Option<String>,

    #[serde(default, deserialize_with = "zip_code::deserialize_option")]
    #[validate(
        required(message = "zip must not be empty"),
        length(min = 1, message = "zip must not be empty")
    )]
    #[schema(example = "12345")]
    pub zip: Option<String>,

    #[validate(
        required(message = "city must not be empty"),
        length(min = 1, message = "city must not be empty")
    )]
    #[schema(example = "Musterstadt")]
    pub city: Option<String>,
}

impl CustomerRequest {
    /// Parses the caller-supplied identifier. Falsy values (`null`, `""`, `0`,
    /// `false`) count as absent and let the store assign one.
    pub fn requested_id(&self) -> Result<Option<ObjectId>, AppError> {
        let invalid =
            |raw: &Value| AppError::BadRequest(anyhow::anyhow!("Invalid customer id: {}", raw));

        match &self.id {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
            Some(Value::String(raw)) if raw.is_empty() => Ok(None),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
            Some(Value::String(raw)) => ObjectId::parse_str(raw)
                .map(Some)
                .map_err(|_| invalid(&Value::String(raw.clone()))),
            Some(other) => Err(invalid(other)),
        }
    }

    /// Validates field presence and converts into the stored representation.
    pub fn into_customer(self, id: Option<ObjectId>) -> Result<Customer, AppError> {
        self.validate()?;

        Ok(Customer {
            id,
            first_name: required(self.first_name, "firstName")?,
            last_name: required(self.last_name, "lastName")?,
            email: required(self.email, "email")?,
            street: required(self.street, "street")?,
            zip: required(self.zip, "zip")?,
            city: required(self.city, "city")?,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("{} must not be empty", field)))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    #[serde(rename = "_id")]
    #[schema(example = "647f1654be8df684218752bb")]
    pub id: String,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "john.doe@skynet.org")]
    pub email: String,
    #[schema(example = "Musterstraße 1")]
    pub street: String,
    #[schema(example = "12345")]
    pub zip: String,
    #[schema(example = "Musterstadt")]
    pub city: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            street: customer.street,
            zip: customer.zip,
            city: customer.city,
        }
    }
}
