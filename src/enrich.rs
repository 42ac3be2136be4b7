//! Attach dependency status to listed projects

use crate::config::NetworkConfig;
use crate::error::{HealthCheckError, Result};
use crate::metadata::{fetch_dependency_info, status_page_url};
use crate::types::{DependencyInfo, Enrichment, Project};
use futures::future::join_all;
use reqwest::Client;
use tracing::debug;

/// Fetch dependency status for one project and merge it in place.
///
/// Failures are contained here: the project is marked
/// [`Enrichment::Failed`] and the function returns `false`.
pub async fn enrich(
    project: &mut Project,
    account: &str,
    client: &Client,
    config: &NetworkConfig,
) -> bool {
    match fetch_for(project, account, client, config).await {
        Ok(dependencies) => {
            debug!(
                project = %project.name(),
                up_to_date = dependencies.totals.up_to_date,
                out_of_date = dependencies.totals.out_of_date,
                "{} dependencies",
                project.name()
            );
            project.enrichment = Enrichment::Enriched { dependencies };
            true
        }
        Err(e) => {
            debug!("Dependency status unknown for {}: {}", project.name(), e);
            project.enrichment = Enrichment::Failed {
                reason: e.to_string(),
            };
            false
        }
    }
}

async fn fetch_for(
    project: &Project,
    account: &str,
    client: &Client,
    config: &NetworkConfig,
) -> Result<DependencyInfo> {
    if account.trim().is_empty() {
        return Err(HealthCheckError::invalid_input("account must not be empty"));
    }
    if project.name().trim().is_empty() {
        return Err(HealthCheckError::invalid_input("project name must not be empty"));
    }

    let info = fetch_dependency_info(client, account, project.name(), config).await?;
    Ok(merge_derived(info, account, project.name(), config))
}

/// Fill in the fields derived from the service's report
pub fn merge_derived(
    mut info: DependencyInfo,
    account: &str,
    project: &str,
    config: &NetworkConfig,
) -> DependencyInfo {
    info.totals.total = info.totals.up_to_date.saturating_add(info.totals.out_of_date);
    info.status_page_url = Some(status_page_url(account, project, config));
    info
}

/// Enrich every project concurrently and wait for all of them to settle.
///
/// Each request writes only into its own project. Returns the number of
/// projects that were enriched successfully.
pub async fn enrich_all(
    projects: &mut [Project],
    account: &str,
    client: &Client,
    config: &NetworkConfig,
) -> usize {
    let outcomes = join_all(
        projects
            .iter_mut()
            .map(|project| enrich(project, account, client, config)),
    )
    .await;

    outcomes.into_iter().filter(|enriched| *enriched).count()
}
