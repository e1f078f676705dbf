// Adapters layer: concrete implementations of the domain ports.

pub mod dataset;
pub mod repository;

pub use dataset::{Dataset, DatasetFormat};
pub use repository::InMemoryCustomerRepository;
