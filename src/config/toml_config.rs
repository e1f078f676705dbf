use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    pub data: Option<DataConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Dataset file (.json or .toml). Relative paths resolve against the working directory.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// Emit JSON log lines instead of the compact format
    pub json: Option<bool>,
}

impl PricingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PricingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PricingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_PATH})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PricingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_path(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.path.as_deref())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.data_path() {
            validate_path("data.path", path)?;
            if path.contains("${") {
                return Err(PricingError::InvalidConfigValueError {
                    field: "data.path".to_string(),
                    value: path.to_string(),
                    reason: "Unresolved environment variable".to_string(),
                });
            }
            validate_file_extension("data.path", path, &["json", "toml"])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[data]
path = "./data/pricing.json"

[logging]
verbose = true
"#;

        let config = PricingConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_path(), Some("./data/pricing.json"));
        assert!(config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PricingConfig::from_toml_str("").unwrap();

        assert_eq!(config.data_path(), None);
        assert!(!config.verbose());
        assert!(!config.json());
    }

    #[test]
    fn test_json_logging_flag() {
        let config = PricingConfig::from_toml_str("[logging]\njson = true\n").unwrap();

        assert!(config.json());
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QL_PRICING_TEST_DATA", "/srv/pricing/seed.toml");

        let config = PricingConfig::from_toml_str(
            r#"
[data]
path = "${QL_PRICING_TEST_DATA}"
"#,
        )
        .unwrap();
        assert_eq!(config.data_path(), Some("/srv/pricing/seed.toml"));

        std::env::remove_var("QL_PRICING_TEST_DATA");
    }

    #[test]
    fn test_unresolved_variable_fails_validation() {
        let config = PricingConfig::from_toml_str(
            r#"
[data]
path = "${QL_PRICING_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[data]\npath = \"seed.json\"\n")
            .unwrap();

        let config = PricingConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_path(), Some("seed.json"));
    }
}
