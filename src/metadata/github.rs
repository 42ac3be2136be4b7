//! List an account's repositories from the GitHub API

use crate::config::NetworkConfig;
use crate::error::{HealthCheckError, Result};
use crate::types::RawProject;
use reqwest::Client;
use tracing::debug;

/// URL of the repository listing for an account
pub fn listing_url(account: &str, config: &NetworkConfig) -> String {
    format!(
        "{}/users/{}/repos",
        config.listing_base(),
        urlencoding::encode(account)
    )
}

/// Fetch the first page of an account's public repositories, in API order
pub async fn fetch_projects(
    client: &Client,
    account: &str,
    config: &NetworkConfig,
) -> Result<Vec<RawProject>> {
    if account.trim().is_empty() {
        return Err(HealthCheckError::invalid_input("account must not be empty"));
    }

    let url = listing_url(account, config);
    debug!("Fetching repository listing from {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| HealthCheckError::listing(account, format!("request failed: {}", e)))?;

    let status = response.status();
    if status.as_u16() == 403 {
        return Err(HealthCheckError::listing(
            account,
            "HTTP 403 Forbidden (rate limit exceeded?)",
        ));
    }
    if status.as_u16() == 404 {
        return Err(HealthCheckError::listing(account, "Account not found"));
    }
    if !status.is_success() {
        return Err(HealthCheckError::listing(account, format!("HTTP {}", status)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| HealthCheckError::listing(account, format!("failed to read body: {}", e)))?;

    serde_json::from_str(&body).map_err(|e| HealthCheckError::malformed("GitHub", e.to_string()))
}
