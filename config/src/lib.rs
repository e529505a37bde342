//! # Configuration Management for QueryKit
//!
//! This crate provides the configuration structures for the QueryKit query
//! layer: which SQL dialect statements are generated for, how callers treat
//! out-of-range page numbers, and which fields each table exposes to filters.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{PageClamp, QueryConfig};
//!
//! let query_config = QueryConfig::new("postgres".to_string(), PageClamp::FloorAtOne, 1);
//! assert_eq!(query_config.page_window, 1);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [query]
//! dialect = "postgres"
//! page_clamp = "floor_at_one"
//! page_window = 1
//!
//! [query.allowed_fields]
//! admin = ["name", "username", "email", "active"]
//! message = ["subject", "is_read"]
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from querykit.toml (or the path in QUERYKIT_CONFIG)
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./querykit.toml";
const CONFIG_PATH_VAR: &str = "QUERYKIT_CONFIG";
const DIALECT_VAR: &str = "QUERYKIT_DIALECT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub query: QueryConfig,
}

/// How list handlers treat a requested page below 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageClamp {
    #[default]
    None,
    FloorAtOne,
}

/// Query layer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Dialect or driver name, e.g. "postgres", "mysql"
    #[serde(default = "default_dialect")]
    pub dialect: String,
    #[serde(default)]
    pub page_clamp: PageClamp,
    /// Page links shown on each side of the current page
    #[serde(default = "default_page_window")]
    pub page_window: i64,
    /// Per-table field allow lists; tables without an entry are unchecked
    #[serde(default)]
    pub allowed_fields: BTreeMap<String, Vec<String>>,
}

fn default_dialect() -> String {
    "standard".to_string()
}

fn default_page_window() -> i64 {
    1
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            page_clamp: PageClamp::default(),
            page_window: default_page_window(),
            allowed_fields: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named in the environment or the default path
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e.into());
            }
        }

        let mut config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            return Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )));
        };

        if let Ok(dialect) = env::var(DIALECT_VAR) {
            config.query.dialect = dialect;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.query.dialect.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Query dialect cannot be empty".to_string(),
            ));
        }
        if self.query.page_window < 0 {
            return Err(ConfigError::Invalid(
                "Query page_window cannot be negative".to_string(),
            ));
        }
        for (table, fields) in &self.query.allowed_fields {
            if table.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "Allowed fields table name cannot be empty".to_string(),
                ));
            }
            if fields.iter().any(|field| field.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "Allowed fields for table '{}' contain an empty name",
                    table
                )));
            }
        }

        Ok(())
    }
}

impl QueryConfig {
    /// Create a new query configuration with no allow lists
    pub fn new(dialect: String, page_clamp: PageClamp, page_window: i64) -> Self {
        Self {
            dialect,
            page_clamp,
            page_window,
            allowed_fields: BTreeMap::new(),
        }
    }

    /// Add an allow list for `table`
    pub fn with_allowed_fields(mut self, table: &str, fields: &[&str]) -> Self {
        self.allowed_fields.insert(
            table.to_string(),
            fields.iter().map(|f| f.to_string()).collect(),
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [query]
            dialect = "postgres"
            page_clamp = "floor_at_one"
            page_window = 2

            [query.allowed_fields]
            admin = ["name", "username"]
            "#,
        )
        .unwrap();

        assert_eq!(config.query.dialect, "postgres");
        assert_eq!(config.query.page_clamp, PageClamp::FloorAtOne);
        assert_eq!(config.query.page_window, 2);
        assert_eq!(
            config.query.allowed_fields.get("admin"),
            Some(&vec!["name".to_string(), "username".to_string()])
        );
    }

    #[test]
    fn test_defaults_when_section_missing() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.query.dialect, "standard");
        assert_eq!(config.query.page_clamp, PageClamp::None);
        assert_eq!(config.query.page_window, 1);
        assert!(config.query.allowed_fields.is_empty());
    }

    #[test]
    fn test_rejects_negative_window() {
        let result = AppConfig::from_toml_str("[query]\npage_window = -1\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_empty_dialect() {
        let result = AppConfig::from_toml_str("[query]\ndialect = \"  \"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_empty_allowed_field() {
        let result = AppConfig::from_toml_str("[query.allowed_fields]\nadmin = [\"name\", \"\"]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unknown_clamp_policy() {
        let result = AppConfig::from_toml_str("[query]\npage_clamp = \"ceiling\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file("./does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_builder_helpers() {
        let config = QueryConfig::new("mysql".to_string(), PageClamp::None, 3)
            .with_allowed_fields("message", &["subject", "is_read"]);
        assert_eq!(config.allowed_fields["message"].len(), 2);
    }
}
