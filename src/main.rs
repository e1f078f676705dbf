use clap::Parser;
use ql_pricing::config::toml_config::PricingConfig;
use ql_pricing::utils::error::{ErrorSeverity, PricingError};
use ql_pricing::utils::{logger, validation::Validate};
use ql_pricing::{CliConfig, Dataset, InMemoryCustomerRepository, LocalStorage, PriceHandler};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let file_config = match config.config.as_deref().map(PricingConfig::from_file) {
        Some(Ok(file_config)) => file_config,
        Some(Err(e)) => {
            eprintln!(
                "❌ Failed to load config file '{}': {}",
                config.config.as_deref().unwrap_or_default(),
                e
            );
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
        None => PricingConfig::default(),
    };

    logger::init_cli_logger(config.verbose || file_config.verbose(), file_config.json());

    tracing::info!("Starting ql-pricing CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate().and_then(|_| file_config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config, &file_config).await {
        tracing::error!(
            "❌ Price calculation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: &CliConfig, file_config: &PricingConfig) -> Result<(), PricingError> {
    // CLI flag wins over the config file
    let dataset = match config.data.as_deref().or(file_config.data_path()) {
        Some(path) => Dataset::load(&LocalStorage::new(".".to_string()), path).await?,
        None => {
            tracing::info!("No dataset given, using built-in seed data");
            Dataset::seed()
        }
    };

    let handler = PriceHandler::new(InMemoryCustomerRepository::new(dataset));
    let query = config.to_query()?;

    let output = if config.breakdown {
        serde_json::to_string_pretty(&handler.handle_with_breakdown(&query).await?)?
    } else {
        serde_json::to_string_pretty(&handler.handle(&query).await?)?
    };
    println!("{}", output);

    Ok(())
}
