#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use ql_pricing::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use ql_pricing::domain::model::{CustomerRef, PriceQuery, PriceResponse};
#[cfg(feature = "lambda")]
use ql_pricing::utils::{logger, validation::parse_date, validation::Validate};
#[cfg(feature = "lambda")]
use ql_pricing::{Dataset, InMemoryCustomerRepository, PriceHandler, PricingError};
#[cfg(feature = "lambda")]
use serde::Deserialize;
#[cfg(feature = "lambda")]
use tokio::sync::OnceCell;

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

#[cfg(feature = "lambda")]
impl Request {
    fn to_query(&self) -> Result<PriceQuery, PricingError> {
        let customer = match (&self.customer_id, &self.customer_name) {
            (Some(id), _) => CustomerRef::Id(*id),
            (None, Some(name)) => CustomerRef::Name(name.clone()),
            (None, None) => {
                return Err(PricingError::ValidationError {
                    message: "Either customerId or customerName is required.".to_string(),
                })
            }
        };
        Ok(PriceQuery {
            customer,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
        })
    }
}

// Dataset is loaded once per container and reused across invocations
#[cfg(feature = "lambda")]
static HANDLER: OnceCell<PriceHandler<InMemoryCustomerRepository>> = OnceCell::const_new();

#[cfg(feature = "lambda")]
async fn build_handler() -> Result<PriceHandler<InMemoryCustomerRepository>, Error> {
    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let storage = S3Storage::new(s3_client, lambda_config.s3_bucket.clone());
    let dataset = Dataset::load(&storage, &lambda_config.data_key).await?;
    Ok(PriceHandler::new(InMemoryCustomerRepository::new(dataset)))
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<PriceResponse, Error> {
    let handler = HANDLER.get_or_try_init(build_handler).await?;

    let query = event.payload.to_query()?;
    match handler.handle(&query).await {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::error!(
                "Price calculation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            Err(e.into())
        }
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
