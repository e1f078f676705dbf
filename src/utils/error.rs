use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("End date cannot be earlier than start date. (start: {start}, end: {end})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Customer {customer} not found.")]
    CustomerNotFound { customer: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Data error: {message}")]
    DataError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent something unusable; maps to a bad-request outcome.
    Request,
    NotFound,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PricingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricingError::InvalidDateRange { .. } | PricingError::ValidationError { .. } => {
                ErrorCategory::Request
            }
            PricingError::CustomerNotFound { .. } => ErrorCategory::NotFound,
            PricingError::InvalidConfigValueError { .. }
            | PricingError::MissingConfigError { .. }
            | PricingError::ConfigError { .. }
            | PricingError::TomlError(_) => ErrorCategory::Configuration,
            PricingError::SerializationError(_) | PricingError::DataError { .. } => {
                ErrorCategory::Data
            }
            PricingError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Medium,
            ErrorCategory::Request | ErrorCategory::Configuration | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PricingError::InvalidDateRange { .. } => {
                "Pass an end date on or after the start date"
            }
            PricingError::CustomerNotFound { .. } => {
                "Check the customer id or name against the loaded dataset"
            }
            PricingError::ValidationError { .. } => "Fix the request parameters and retry",
            PricingError::InvalidConfigValueError { .. }
            | PricingError::MissingConfigError { .. }
            | PricingError::ConfigError { .. }
            | PricingError::TomlError(_) => "Review the configuration file and CLI flags",
            PricingError::SerializationError(_) | PricingError::DataError { .. } => {
                "Make sure the dataset file is valid JSON or TOML and references existing records"
            }
            PricingError::IoError(_) => "Check that the file exists and is readable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PricingError::InvalidDateRange { .. } => {
                "End date cannot be earlier than start date.".to_string()
            }
            PricingError::CustomerNotFound { .. } | PricingError::ValidationError { .. } => {
                self.to_string()
            }
            PricingError::IoError(e) => format!("Could not read input: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
