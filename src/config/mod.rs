#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use crate::domain::model::{CustomerRef, PriceQuery};
    use crate::utils::error::{PricingError, Result};
    use crate::utils::validation::{parse_date, validate_file_extension, validate_path, Validate};
    use clap::{ArgGroup, Parser};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "ql-pricing")]
    #[command(about = "Calculate a customer's price over a date range")]
    #[command(group(
        ArgGroup::new("customer")
            .required(true)
            .args(["customer_id", "customer_name"])
    ))]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Dataset file (.json or .toml); the built-in seed data is used when omitted
        #[arg(long)]
        pub data: Option<String>,

        #[arg(long)]
        pub customer_id: Option<i64>,

        #[arg(long)]
        pub customer_name: Option<String>,

        /// First day of the period (inclusive)
        #[arg(long)]
        pub start_date: String,

        /// Last day of the period (inclusive)
        #[arg(long)]
        pub end_date: String,

        /// Print chargeable days, free days and subtotal alongside the total
        #[arg(long)]
        pub breakdown: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn to_query(&self) -> Result<PriceQuery> {
            let customer = match (&self.customer_id, &self.customer_name) {
                (Some(id), _) => CustomerRef::Id(*id),
                (None, Some(name)) => CustomerRef::Name(name.clone()),
                (None, None) => {
                    return Err(PricingError::MissingConfigError {
                        field: "customer_id or customer_name".to_string(),
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

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(config) = &self.config {
                validate_path("config", config)?;
            }
            if let Some(data) = &self.data {
                validate_path("data", data)?;
                validate_file_extension("data", data, &["json", "toml"])?;
            }
            parse_date(&self.start_date)?;
            parse_date(&self.end_date)?;
            Ok(())
        }
    }

}
