use anyhow::Result;
use chrono::NaiveDate;
use ql_pricing::config::toml_config::PricingConfig;
use ql_pricing::core::CustomerRepository;
use ql_pricing::domain::model::{CustomerRef, PriceQuery};
use ql_pricing::utils::validation::Validate;
use ql_pricing::{calculate_total_price, Dataset, InMemoryCustomerRepository, LocalStorage, PriceHandler};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

const DATASET_TOML: &str = r#"
[[services]]
id = 1
name = "Service A"
base_price_per_day = "0.2"
charges_on_weekends = false

[[services]]
id = 3
name = "Service C"
base_price_per_day = "0.4"
charges_on_weekends = true

[[customers]]
id = 10
name = "Weekday Only"

[[customers]]
id = 11
name = "Discounted"
global_free_days = 0

[[customers]]
id = 12
name = "Dangling"

[[usages]]
id = 1
customer_id = 10
service_id = 1
start_date = "2024-01-01"

[[usages]]
id = 2
customer_id = 11
service_id = 3
start_date = "2024-01-01"

[[usages]]
id = 3
customer_id = 12
service_id = 99
start_date = "2024-01-01"

[[usages]]
id = 4
customer_id = 12
service_id = 3
start_date = "2024-01-01"
customer_specific_price_per_day = "1"

[[discounts]]
id = 1
customer_id = 11
service_id = 3
percentage = "0.20"
start_date = "2024-01-01"
end_date = "2024-01-10"

[[discounts]]
id = 2
customer_id = 11
service_id = 3
percentage = "0.60"
start_date = "2024-01-05"
end_date = "2024-01-15"
"#;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

async fn load_handler(dir: &TempDir) -> Result<PriceHandler<InMemoryCustomerRepository>> {
    std::fs::write(dir.path().join("pricing.toml"), DATASET_TOML)?;
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let dataset = Dataset::load(&storage, "pricing.toml").await?;
    Ok(PriceHandler::new(InMemoryCustomerRepository::new(dataset)))
}

#[tokio::test]
async fn test_weekday_service_from_toml_dataset() -> Result<()> {
    let dir = TempDir::new()?;
    let handler = load_handler(&dir).await?;

    let response = handler
        .handle(&PriceQuery {
            customer: CustomerRef::Id(10),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 7),
        })
        .await?;

    assert_eq!(response.total_price, dec!(1.0));
    Ok(())
}

#[tokio::test]
async fn test_overlapping_discounts_from_toml_dataset() -> Result<()> {
    let dir = TempDir::new()?;
    let handler = load_handler(&dir).await?;

    let response = handler
        .handle(&PriceQuery {
            customer: CustomerRef::Name("Discounted".to_string()),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 15),
        })
        .await?;

    assert_eq!(response.total_price, dec!(3.04));
    Ok(())
}

#[tokio::test]
async fn test_dangling_service_is_skipped_not_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    let handler = load_handler(&dir).await?;

    let response = handler
        .handle(&PriceQuery {
            customer: CustomerRef::Id(12),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 3),
        })
        .await?;

    assert_eq!(response.total_price, dec!(3));
    Ok(())
}

#[tokio::test]
async fn test_free_days_saturate_at_zero() -> Result<()> {
    let repository = InMemoryCustomerRepository::new(Dataset::seed());
    let mut customer = repository.find_by_id(1).await?.expect("seeded customer");

    let mut previous = calculate_total_price(date(2019, 9, 20), date(2019, 9, 30), &customer);
    for free_days in 1..=15 {
        customer.global_free_days = free_days;
        let total = calculate_total_price(date(2019, 9, 20), date(2019, 9, 30), &customer);
        assert!(total <= previous);
        assert!(total >= Decimal::ZERO);
        previous = total;
    }

    // 11 days in range, all chargeable for Service C
    assert_eq!(previous, Decimal::ZERO);
    Ok(())
}

#[tokio::test]
async fn test_invalid_dataset_is_rejected_on_load() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("broken.json"),
        r#"{"customers": [{"id": 1, "name": "X"}],
            "discounts": [{"id": 1, "customer_id": 1, "service_id": 1, "percentage": "1.5",
                           "start_date": "2024-01-01", "end_date": "2024-01-02"}]}"#,
    )?;
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

    assert!(Dataset::load(&storage, "broken.json").await.is_err());
    Ok(())
}

#[test]
fn test_config_file_points_at_dataset() -> Result<()> {
    let config = PricingConfig::from_toml_str("[data]\npath = \"pricing.toml\"\n")?;

    config.validate()?;
    assert_eq!(config.data_path(), Some("pricing.toml"));
    Ok(())
}
