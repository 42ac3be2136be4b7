//! Error types for the health check pipeline

use thiserror::Error;

/// Result type alias for health check operations
pub type Result<T> = std::result::Result<T, HealthCheckError>;

/// Main error type for health check operations
#[derive(Error, Debug)]
pub enum HealthCheckError {
    /// The repository listing could not be fetched. Fatal to a run.
    #[error("Failed to list repositories for '{account}': {message}")]
    ListingFetch { account: String, message: String },

    /// Dependency status for a single project could not be fetched.
    #[error("Failed to fetch dependency status for '{project}': {message}")]
    EnrichmentFetch { project: String, message: String },

    #[error("Malformed response from {service}: {message}")]
    MalformedResponse { service: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A health check run is already in progress")]
    AlreadyRunning,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl HealthCheckError {
    /// Create a listing fetch error
    pub fn listing(account: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ListingFetch {
            account: account.into(),
            message: message.into(),
        }
    }

    /// Create an enrichment fetch error
    pub fn enrichment(project: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EnrichmentFetch {
            project: project.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
