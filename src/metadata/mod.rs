//! Fetchers for the repository listing and dependency status services

pub mod david;
pub mod github;

pub use david::{fetch_dependency_info, status_page_url};
pub use github::fetch_projects;

use crate::config::NetworkConfig;
use crate::error::{HealthCheckError, Result};
use reqwest::Client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every request of a run
pub fn build_client(config: &NetworkConfig) -> Result<Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout())
        .default_headers(headers)
        .build()
        .map_err(|e| HealthCheckError::config(format!("Failed to build HTTP client: {}", e)))
}
