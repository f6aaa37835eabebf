pub mod memory;
pub mod metrics;
pub mod mongo;
pub mod repository;

pub use memory::InMemoryCustomerRepository;
pub use self::metrics::{get_metrics, init_metrics, record_customer_operation};
pub use mongo::MongoCustomerRepository;
pub use repository::{CustomerRepository, RepositoryError};
