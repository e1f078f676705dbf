use crate::adapters::dataset::{CustomerRecord, Dataset};
use crate::core::{CustomerRepository, Result};
use crate::domain::model::{Customer, CustomerServiceUsage, Discount, Service};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Serves customer snapshots out of an in-memory dataset.
#[derive(Debug, Clone)]
pub struct InMemoryCustomerRepository {
    dataset: Arc<Dataset>,
}

impl InMemoryCustomerRepository {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    fn snapshot(&self, record: &CustomerRecord) -> Customer {
        let services: HashMap<i64, &Service> = self
            .dataset
            .services
            .iter()
            .map(|service| (service.id, service))
            .collect();

        let service_usages = self
            .dataset
            .usages
            .iter()
            .filter(|usage| usage.customer_id == record.id)
            .map(|usage| {
                let service = services.get(&usage.service_id).map(|s| (*s).clone());
                if service.is_none() {
                    tracing::warn!(
                        "Usage {} of customer {} references unknown service {}; it will not be billed",
                        usage.id,
                        record.id,
                        usage.service_id
                    );
                }
                CustomerServiceUsage {
                    id: usage.id,
                    service_id: usage.service_id,
                    start_date: usage.start_date,
                    customer_specific_price_per_day: usage.customer_specific_price_per_day,
                    service,
                }
            })
            .collect();

        let discounts = self
            .dataset
            .discounts
            .iter()
            .filter(|discount| discount.customer_id == record.id)
            .map(Discount::from)
            .collect();

        Customer {
            id: record.id,
            name: record.name.clone(),
            global_free_days: record.global_free_days,
            service_usages,
            discounts,
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        Ok(self
            .dataset
            .customers
            .iter()
            .find(|customer| customer.id == id)
            .map(|record| self.snapshot(record)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>> {
        Ok(self
            .dataset
            .customers
            .iter()
            .find(|customer| customer.name == name)
            .map(|record| self.snapshot(record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_snapshot_joins_services_and_discounts() {
        let repository = InMemoryCustomerRepository::new(Dataset::seed());

        let customer = repository.find_by_id(1).await.unwrap().unwrap();

        assert_eq!(customer.name, "Customer X");
        assert_eq!(customer.service_usages.len(), 2);
        assert!(customer.service_usages.iter().all(|u| u.service.is_some()));
        assert_eq!(customer.discounts.len(), 1);
        assert_eq!(customer.discounts[0].percentage, dec!(0.20));
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact() {
        let repository = InMemoryCustomerRepository::new(Dataset::seed());

        assert!(repository.find_by_name("Customer Y").await.unwrap().is_some());
        assert!(repository.find_by_name("customer y").await.unwrap().is_none());
        assert!(repository.find_by_name("Customer Z").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_service_leaves_usage_unresolved() {
        let mut dataset = Dataset::seed();
        dataset.usages[0].service_id = 42;
        let repository = InMemoryCustomerRepository::new(dataset);

        let customer = repository.find_by_id(1).await.unwrap().unwrap();

        let dangling = customer
            .service_usages
            .iter()
            .find(|u| u.service_id == 42)
            .unwrap();
        assert!(dangling.service.is_none());
    }
}
