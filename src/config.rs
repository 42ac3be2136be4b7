//! Configuration for a health check run

use crate::error::{HealthCheckError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration for the health check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Which account to inspect and what to fetch
    pub options: CheckOptions,
    /// Network configuration
    pub network: NetworkConfig,
}

/// Options for a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    /// Account whose public repositories are listed
    pub account: String,
    /// Whether to fetch dependency status for every project
    pub fetch_dependencies: bool,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Base URL of the repository listing API
    pub listing_api_url: String,
    /// Base URL of the dependency status service
    pub dependency_api_url: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            account: String::new(),
            fetch_dependencies: true,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            listing_api_url: "https://api.github.com".to_string(),
            dependency_api_url: "https://david-dm.org".to_string(),
        }
    }
}

impl NetworkConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Listing base URL without a trailing slash
    pub fn listing_base(&self) -> &str {
        self.listing_api_url.trim_end_matches('/')
    }

    /// Dependency service base URL without a trailing slash
    pub fn dependency_base(&self) -> &str {
        self.dependency_api_url.trim_end_matches('/')
    }
}

impl CheckConfig {
    /// Create a new builder for CheckConfig
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check that a run can be started with this configuration
    pub fn validate(&self) -> Result<()> {
        if self.options.account.trim().is_empty() {
            return Err(HealthCheckError::config("account must not be empty"));
        }
        if self.network.timeout_secs == 0 {
            return Err(HealthCheckError::config("timeout_secs must be greater than 0"));
        }
        for (key, url) in [
            ("listing_api_url", &self.network.listing_api_url),
            ("dependency_api_url", &self.network.dependency_api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(HealthCheckError::config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    key, url
                )));
            }
        }
        Ok(())
    }
}

/// Builder for CheckConfig
#[derive(Default)]
pub struct CheckConfigBuilder {
    account: Option<String>,
    fetch_dependencies: Option<bool>,
    network: Option<NetworkConfig>,
}

impl CheckConfigBuilder {
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn fetch_dependencies(mut self, enabled: bool) -> Self {
        self.fetch_dependencies = Some(enabled);
        self
    }

    pub fn network(mut self, network: NetworkConfig) -> Self {
        self.network = Some(network);
        self
    }

    pub fn build(self) -> CheckConfig {
        let defaults = CheckOptions::default();
        CheckConfig {
            options: CheckOptions {
                account: self.account.unwrap_or(defaults.account),
                fetch_dependencies: self
                    .fetch_dependencies
                    .unwrap_or(defaults.fetch_dependencies),
            },
            network: self.network.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = CheckConfig::builder().account("octocat").build();
        assert_eq!(config.options.account, "octocat");
        assert!(config.options.fetch_dependencies);
        assert_eq!(config.network.listing_base(), "https://api.github.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_account() {
        let config = CheckConfig::builder().build();
        assert!(matches!(
            config.validate(),
            Err(HealthCheckError::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let network = NetworkConfig {
            dependency_api_url: "david-dm.org".to_string(),
            ..NetworkConfig::default()
        };
        let config = CheckConfig::builder()
            .account("octocat")
            .network(network)
            .build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = CheckConfig::from_toml(
            r#"
            [options]
            account = "bigstickcarpet"
            fetch_dependencies = false

            [network]
            dependency_api_url = "http://localhost:1234/"
            "#,
        )
        .unwrap();

        assert_eq!(config.options.account, "bigstickcarpet");
        assert!(!config.options.fetch_dependencies);
        assert_eq!(config.network.timeout_secs, 30);
        assert_eq!(config.network.dependency_base(), "http://localhost:1234");
    }
}
