//! Fetch dependency status from a david-dm style service

use crate::config::NetworkConfig;
use crate::error::{HealthCheckError, Result};
use crate::types::DependencyInfo;
use reqwest::Client;
use tracing::debug;

fn project_path(account: &str, project: &str) -> String {
    format!(
        "{}/{}",
        urlencoding::encode(account),
        urlencoding::encode(project)
    )
}

/// URL of the machine-readable dependency status
pub fn dependency_status_url(account: &str, project: &str, config: &NetworkConfig) -> String {
    format!(
        "{}/{}/info.json",
        config.dependency_base(),
        project_path(account, project)
    )
}

/// URL of the human-readable status page
pub fn status_page_url(account: &str, project: &str, config: &NetworkConfig) -> String {
    format!(
        "{}/{}/",
        config.dependency_base(),
        project_path(account, project)
    )
}

/// Fetch the dependency status of `account/project`.
///
/// The returned info is exactly what the service reported; totals and
/// the status page URL are filled in by the enricher.
pub async fn fetch_dependency_info(
    client: &Client,
    account: &str,
    project: &str,
    config: &NetworkConfig,
) -> Result<DependencyInfo> {
    let url = dependency_status_url(account, project, config);
    debug!("Fetching dependency status from {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| HealthCheckError::enrichment(project, format!("request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(HealthCheckError::enrichment(
            project,
            format!("HTTP {}", response.status()),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| HealthCheckError::enrichment(project, format!("failed to read body: {}", e)))?;

    serde_json::from_str(&body).map_err(|e| HealthCheckError::malformed("david-dm", e.to_string()))
}
