use crate::core::Storage;
use crate::domain::model::{Discount, Service};
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub global_free_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: i64,
    pub customer_id: i64,
    pub service_id: i64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub customer_specific_price_per_day: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRecord {
    pub id: i64,
    pub customer_id: i64,
    pub service_id: i64,
    pub percentage: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<&DiscountRecord> for Discount {
    fn from(record: &DiscountRecord) -> Self {
        Self {
            id: record.id,
            service_id: record.service_id,
            percentage: record.percentage,
            start_date: record.start_date,
            end_date: record.end_date,
        }
    }
}

/// Flat tables as persisted. Joined into customer snapshots by the repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub usages: Vec<UsageRecord>,
    #[serde(default)]
    pub discounts: Vec<DiscountRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Toml,
}

impl DatasetFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        match std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(PricingError::InvalidConfigValueError {
                field: "data.path".to_string(),
                value: path.to_string(),
                reason: "Dataset must be a .json or .toml file".to_string(),
            }),
        }
    }
}

impl Dataset {
    pub fn from_slice(bytes: &[u8], format: DatasetFormat) -> Result<Self> {
        let dataset: Dataset = match format {
            DatasetFormat::Json => serde_json::from_slice(bytes)?,
            DatasetFormat::Toml => {
                let content = std::str::from_utf8(bytes).map_err(|e| PricingError::DataError {
                    message: format!("Dataset is not valid UTF-8: {}", e),
                })?;
                toml::from_str(content)?
            }
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Reads and validates a dataset through any storage backend.
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let format = DatasetFormat::from_path(path)?;
        let bytes = storage.read_file(path).await?;
        let dataset = Self::from_slice(&bytes, format)?;
        tracing::info!(
            "Loaded dataset '{}': {} services, {} customers, {} usages, {} discounts",
            path,
            dataset.services.len(),
            dataset.customers.len(),
            dataset.usages.len(),
            dataset.discounts.len()
        );
        Ok(dataset)
    }

    /// Reference data: three services and two customers.
    pub fn seed() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        Self {
            services: vec![
                Service {
                    id: 1,
                    name: "Service A".to_string(),
                    base_price_per_day: dec!(0.2),
                    charges_on_weekends: false,
                },
                Service {
                    id: 2,
                    name: "Service B".to_string(),
                    base_price_per_day: dec!(0.24),
                    charges_on_weekends: false,
                },
                Service {
                    id: 3,
                    name: "Service C".to_string(),
                    base_price_per_day: dec!(0.4),
                    charges_on_weekends: true,
                },
            ],
            customers: vec![
                CustomerRecord {
                    id: 1,
                    name: "Customer X".to_string(),
                    global_free_days: 0,
                },
                CustomerRecord {
                    id: 2,
                    name: "Customer Y".to_string(),
                    global_free_days: 200,
                },
            ],
            usages: vec![
                UsageRecord {
                    id: 1,
                    customer_id: 1,
                    service_id: 1,
                    start_date: date(2019, 9, 20),
                    customer_specific_price_per_day: None,
                },
                UsageRecord {
                    id: 2,
                    customer_id: 1,
                    service_id: 3,
                    start_date: date(2019, 9, 20),
                    customer_specific_price_per_day: None,
                },
                UsageRecord {
                    id: 3,
                    customer_id: 2,
                    service_id: 2,
                    start_date: date(2018, 1, 1),
                    customer_specific_price_per_day: None,
                },
                UsageRecord {
                    id: 4,
                    customer_id: 2,
                    service_id: 3,
                    start_date: date(2018, 1, 1),
                    customer_specific_price_per_day: None,
                },
            ],
            discounts: vec![
                DiscountRecord {
                    id: 1,
                    customer_id: 1,
                    service_id: 3,
                    percentage: dec!(0.20),
                    start_date: date(2019, 9, 22),
                    end_date: date(2019, 9, 24),
                },
                DiscountRecord {
                    id: 2,
                    customer_id: 2,
                    service_id: 2,
                    percentage: dec!(0.30),
                    start_date: date(2018, 1, 1),
                    end_date: date(2099, 12, 31),
                },
                DiscountRecord {
                    id: 3,
                    customer_id: 2,
                    service_id: 3,
                    percentage: dec!(0.30),
                    start_date: date(2018, 1, 1),
                    end_date: date(2099, 12, 31),
                },
            ],
        }
    }
}

impl Validate for Dataset {
    fn validate(&self) -> Result<()> {
        let mut service_ids = HashSet::new();
        for service in &self.services {
            validate_non_empty_string("services.name", &service.name)?;
            if service.base_price_per_day < Decimal::ZERO {
                return Err(invalid_record("services.base_price_per_day", service.id, "price cannot be negative"));
            }
            if !service_ids.insert(service.id) {
                return Err(invalid_record("services.id", service.id, "duplicate service id"));
            }
        }

        let mut customer_ids = HashSet::new();
        for customer in &self.customers {
            validate_non_empty_string("customers.name", &customer.name)?;
            if !customer_ids.insert(customer.id) {
                return Err(invalid_record("customers.id", customer.id, "duplicate customer id"));
            }
        }

        for usage in &self.usages {
            if !customer_ids.contains(&usage.customer_id) {
                return Err(invalid_record("usages.customer_id", usage.id, "unknown customer"));
            }
            if matches!(usage.customer_specific_price_per_day, Some(price) if price < Decimal::ZERO) {
                return Err(invalid_record(
                    "usages.customer_specific_price_per_day",
                    usage.id,
                    "price cannot be negative",
                ));
            }
        }

        for discount in &self.discounts {
            if !customer_ids.contains(&discount.customer_id) {
                return Err(invalid_record("discounts.customer_id", discount.id, "unknown customer"));
            }
            if discount.percentage < Decimal::ZERO || discount.percentage >= Decimal::ONE {
                return Err(invalid_record(
                    "discounts.percentage",
                    discount.id,
                    "percentage must be in [0, 1)",
                ));
            }
            if discount.end_date < discount.start_date {
                return Err(invalid_record(
                    "discounts.end_date",
                    discount.id,
                    "end date cannot be earlier than start date",
                ));
            }
        }

        Ok(())
    }
}

fn invalid_record(field: &str, id: i64, reason: &str) -> PricingError {
    PricingError::InvalidConfigValueError {
        field: field.to_string(),
        value: format!("record {}", id),
        reason: reason.to_string(),
    }
}
