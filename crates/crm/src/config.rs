//! CRM configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//!
//! - `CRM_HOST` - Bind address (default: 127.0.0.1)
//! - `CRM_PORT` - Listen port (default: 3002)
//! - `CRM_BASE_URL` - Public URL; `https://` enables secure cookies (default: http://localhost:3002)
//! - `CRM_DATA_FILE` - Lead file path (default: customer_data.csv)
//! - `CRM_SEED_EXAMPLES` - Show example leads until the first save (default: false)
//! - `CRM_REQUIRE_PHONE` - Require a phone number on new leads (default: false)
//! - `CRM_SEARCH_SCOPE` - `name` or `all` (default: all)
//! - `CRM_SEARCH_CASE_SENSITIVE` - Case-sensitive search (default: false)
//! - `CRM_ACCOUNTS_FILE` - YAML accounts file replacing the built-in staff table
//! - `CRM_LOG_JSON` - Emit JSON logs (default: false)
//! - `CRM_SENTRY_DSN` - Sentry error tracking DSN
//! - `CRM_SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::services::{AccountsError, RequiredFields, SearchOptions, SearchScope, StaticAccounts};
use crate::store::SeedPolicy;

const DEFAULT_DATA_FILE: &str = "customer_data.csv";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Accounts file {0}: {1}")]
    Accounts(String, AccountsError),
}

/// CRM application configuration.
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Lead file
    pub data_file: PathBuf,
    /// What an absent lead file loads as
    pub seed: SeedPolicy,
    /// Required lead form fields
    pub required: RequiredFields,
    /// Search matching rules
    pub search: SearchOptions,
    /// Accounts file replacing the built-in staff table
    pub accounts_file: Option<PathBuf>,
    /// JSON log output
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

impl CrmConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let host = env
            .or_default("CRM_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CRM_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("CRM_PORT", "3002")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CRM_PORT".to_string(), e.to_string()))?;
        let base_url = env.or_default("CRM_BASE_URL", "http://localhost:3002");
        let data_file = PathBuf::from(env.or_default("CRM_DATA_FILE", DEFAULT_DATA_FILE));

        let seed = if env.flag("CRM_SEED_EXAMPLES")? {
            SeedPolicy::Examples
        } else {
            SeedPolicy::Empty
        };
        let required = if env.flag("CRM_REQUIRE_PHONE")? {
            RequiredFields::NameAndPhone
        } else {
            RequiredFields::NameOnly
        };
        let scope = env
            .or_default("CRM_SEARCH_SCOPE", "all")
            .parse::<SearchScope>()
            .map_err(|e| ConfigError::InvalidEnvVar("CRM_SEARCH_SCOPE".to_string(), e))?;
        let search = SearchOptions {
            scope,
            case_sensitive: env.flag("CRM_SEARCH_CASE_SENSITIVE")?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            data_file,
            seed,
            required,
            search,
            accounts_file: env.optional("CRM_ACCOUNTS_FILE").map(PathBuf::from),
            log_json: env.flag("CRM_LOG_JSON")?,
            sentry_dsn: env.optional("CRM_SENTRY_DSN"),
            sentry_environment: env.optional("CRM_SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// The staff accounts: the configured file, or the built-in table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Accounts` if the accounts file cannot be loaded.
    pub fn accounts(&self) -> Result<StaticAccounts, ConfigError> {
        match &self.accounts_file {
            Some(path) => StaticAccounts::from_yaml_file(path)
                .map_err(|e| ConfigError::Accounts(path.display().to_string(), e)),
            None => Ok(StaticAccounts::default_staff()),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a boolean flag; unset means false.
    fn flag(&self, key: &str) -> Result<bool, ConfigError> {
        match self.optional(key) {
            None => Ok(false),
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar(key.to_string(), format!("expected a boolean, got {value}"))
            }),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<CrmConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CrmConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3002");
        assert_eq!(config.data_file, PathBuf::from("customer_data.csv"));
        assert_eq!(config.seed, SeedPolicy::Empty);
        assert_eq!(config.required, RequiredFields::NameOnly);
        assert_eq!(config.search, SearchOptions::default());
        assert!(!config.is_secure());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CRM_PORT", "8080"),
            ("CRM_BASE_URL", "https://crm.example.com"),
            ("CRM_SEED_EXAMPLES", "true"),
            ("CRM_REQUIRE_PHONE", "1"),
            ("CRM_SEARCH_SCOPE", "name"),
            ("CRM_SEARCH_CASE_SENSITIVE", "yes"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert_eq!(config.seed, SeedPolicy::Examples);
        assert_eq!(config.required, RequiredFields::NameAndPhone);
        assert_eq!(config.search.scope, SearchScope::NameOnly);
        assert!(config.search.case_sensitive);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("CRM_PORT", "washing")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "CRM_PORT"
        ));
        assert!(matches!(
            config_from(&[("CRM_SEED_EXAMPLES", "maybe")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "CRM_SEED_EXAMPLES"
        ));
        assert!(config_from(&[("CRM_SEARCH_SCOPE", "phone")]).is_err());
    }

    #[test]
    fn test_blank_is_unset() {
        let config = config_from(&[("CRM_ACCOUNTS_FILE", "  "), ("CRM_HOST", "")]).unwrap();
        assert!(config.accounts_file.is_none());
        assert_eq!(config.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_accounts_default_and_file() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.accounts().unwrap().accounts().len(), 3);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.yaml");
        std::fs::write(&path, "- {username: solo, password: pw, role: admin}\n").unwrap();
        let config = config_from(&[("CRM_ACCOUNTS_FILE", path.to_str().unwrap())]).unwrap();
        assert_eq!(config.accounts().unwrap().accounts().len(), 1);

        let missing = config_from(&[("CRM_ACCOUNTS_FILE", "/nonexistent/accounts.yaml")]).unwrap();
        assert!(matches!(missing.accounts(), Err(ConfigError::Accounts(..))));
    }
}
