pub mod customer;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use customer::{CustomerRequest, CustomerResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Customer not found")]
    pub error: String,
    pub details: Option<String>,
}
