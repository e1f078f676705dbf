pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use adapters::{Dataset, InMemoryCustomerRepository};
pub use crate::core::{handler::PriceHandler, pricing::calculate_total_price};
pub use utils::error::{PricingError, Result};
