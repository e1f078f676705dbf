use crate::core::pricing;
use crate::core::{CustomerRepository, Result};
use crate::domain::model::{Customer, CustomerRef, PriceBreakdown, PriceQuery, PriceResponse};
use crate::utils::error::PricingError;
use crate::utils::validation::validate_date_range;

/// Validates a price query, resolves the customer, and runs the pricing core.
pub struct PriceHandler<R: CustomerRepository> {
    repository: R,
}

impl<R: CustomerRepository> PriceHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: &PriceQuery) -> Result<PriceResponse> {
        let customer = self.prepare(query).await?;
        let total_price =
            pricing::calculate_total_price(query.start_date, query.end_date, &customer).normalize();

        tracing::info!(
            "Calculated total price for Customer {} is {}",
            customer.id,
            total_price
        );
        Ok(PriceResponse { total_price })
    }

    pub async fn handle_with_breakdown(&self, query: &PriceQuery) -> Result<PriceBreakdown> {
        let customer = self.prepare(query).await?;
        let mut breakdown = pricing::calculate_breakdown(query.start_date, query.end_date, &customer);
        breakdown.subtotal = breakdown.subtotal.normalize();
        breakdown.total_price = breakdown.total_price.normalize();

        tracing::debug!(
            "Customer {}: {} chargeable days, {} free days applied, subtotal {}",
            customer.id,
            breakdown.chargeable_days,
            breakdown.free_days_applied,
            breakdown.subtotal
        );
        tracing::info!(
            "Calculated total price for Customer {} is {}",
            customer.id,
            breakdown.total_price
        );
        Ok(breakdown)
    }

    async fn prepare(&self, query: &PriceQuery) -> Result<Customer> {
        tracing::info!(
            "Handling price query for customer {} from {} to {}",
            query.customer,
            query.start_date,
            query.end_date
        );

        if let Err(e) = validate_query(query) {
            tracing::warn!("Rejected price query: {}", e);
            return Err(e);
        }

        let found = match &query.customer {
            CustomerRef::Id(id) => self.repository.find_by_id(*id).await?,
            CustomerRef::Name(name) => self.repository.find_by_name(name).await?,
        };

        let customer = found.ok_or_else(|| {
            tracing::warn!("Customer {} not found", query.customer);
            PricingError::CustomerNotFound {
                customer: query.customer.to_string(),
            }
        })?;

        tracing::info!(
            "Customer {} found with {} free days",
            customer.id,
            customer.global_free_days
        );
        Ok(customer)
    }
}

pub fn validate_query(query: &PriceQuery) -> Result<()> {
    match &query.customer {
        CustomerRef::Id(id) if *id <= 0 => {
            return Err(PricingError::ValidationError {
                message: "CustomerId must be positive.".to_string(),
            })
        }
        CustomerRef::Name(name) if name.trim().is_empty() => {
            return Err(PricingError::ValidationError {
                message: "Customer name cannot be empty.".to_string(),
            })
        }
        _ => {}
    }

    validate_date_range(query.start_date, query.end_date)
}
