pub mod customers;
pub mod health;
pub mod metrics;

pub use customers::{
    create_customer, delete_customer, get_customer, list_customers, update_customer,
};
pub use health::health_check;
pub use self::metrics::metrics_endpoint;
