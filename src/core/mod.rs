pub mod handler;
pub mod pricing;

pub use crate::domain::model::{Customer, PriceBreakdown, PriceQuery, PriceResponse};
pub use crate::domain::ports::{CustomerRepository, Storage};
pub use crate::utils::error::Result;
