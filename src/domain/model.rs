use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub base_price_per_day: Decimal,
    pub charges_on_weekends: bool,
}

/// One customer's use of one service, open-ended from `start_date`.
///
/// `service` holds the joined service record; `None` means the reference
/// could not be resolved and the usage is not billed.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerServiceUsage {
    pub id: i64,
    pub service_id: i64,
    pub start_date: NaiveDate,
    pub customer_specific_price_per_day: Option<Decimal>,
    pub service: Option<Service>,
}

/// Percentage off a service between two dates, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: i64,
    pub service_id: i64,
    pub percentage: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Discount {
    pub fn covers(&self, service_id: i64, date: NaiveDate) -> bool {
        self.service_id == service_id && self.start_date <= date && date <= self.end_date
    }
}

/// Read-only snapshot of a customer with usages and discounts already joined.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub global_free_days: u32,
    pub service_usages: Vec<CustomerServiceUsage>,
    pub discounts: Vec<Discount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    Id(i64),
    Name(String),
}

impl std::fmt::Display for CustomerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerRef::Id(id) => write!(f, "with ID {}", id),
            CustomerRef::Name(name) => write!(f, "with name '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    pub customer: CustomerRef,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub chargeable_days: usize,
    pub free_days_applied: usize,
    pub subtotal: Decimal,
    pub total_price: Decimal,
}
