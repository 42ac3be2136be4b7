//! Main health check orchestration logic

use crate::config::CheckConfig;
use crate::enrich::enrich_all;
use crate::error::{HealthCheckError, Result};
use crate::filter::filter_projects;
use crate::metadata::{build_client, fetch_projects};
use crate::stats::calculate_stats;
use crate::types::{AggregateState, Project, RunSummary};
use chrono::Utc;
use reqwest::Client;
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Runs the list, filter, enrich and aggregate stages and owns the
/// resulting state. Consumers read it through [`HealthCheck::snapshot`].
pub struct HealthCheck {
    config: CheckConfig,
    client: Client,
    state: RwLock<AggregateState>,
    run_lock: Mutex<()>,
}

impl HealthCheck {
    /// Create a health check for the given configuration
    pub fn new(config: CheckConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(&config.network)?;
        let state = AggregateState::new(config.options.clone());

        Ok(Self {
            config,
            client,
            state: RwLock::new(state),
            run_lock: Mutex::new(()),
        })
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> AggregateState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, state: AggregateState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Run every stage once.
    ///
    /// Only a failed listing is fatal: the state is left empty and the
    /// error is returned. A call made while another run is in flight
    /// fails with [`HealthCheckError::AlreadyRunning`].
    pub async fn run(&self) -> Result<RunSummary> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| HealthCheckError::AlreadyRunning)?;

        let options = &self.config.options;
        info!("Starting health check for account: {}", options.account);
        self.publish(AggregateState::new(options.clone()));

        let result = self.run_stages().await;
        if let Err(e) = &result {
            error!("Health check failed: {}", e);
        }
        result
    }

    async fn run_stages(&self) -> Result<RunSummary> {
        let options = &self.config.options;
        let network = &self.config.network;
        let mut summary = RunSummary::default();

        // List
        let listing = fetch_projects(&self.client, &options.account, network).await?;
        summary.listed = listing.len();
        debug!(
            count = listing.len(),
            projects = ?listing.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "All GitHub projects"
        );

        // Filter
        let mut projects: Vec<Project> = filter_projects(listing)
            .into_iter()
            .map(Project::new)
            .collect();
        summary.included = projects.len();
        debug!(
            count = projects.len(),
            projects = ?projects.iter().map(Project::name).collect::<Vec<_>>(),
            "Filtered projects"
        );
        self.publish(AggregateState {
            projects: projects.clone(),
            ..AggregateState::new(options.clone())
        });

        // Enrich
        if options.fetch_dependencies {
            summary.enriched =
                enrich_all(&mut projects, &options.account, &self.client, network).await;
            summary.enrichment_failures = summary.included - summary.enriched;
        } else {
            debug!("Dependency status disabled; skipping enrichment");
        }

        // Aggregate
        let mut state = AggregateState {
            projects,
            ..AggregateState::new(options.clone())
        };
        calculate_stats(&mut state);
        state.completed_at = Some(Utc::now());

        info!(
            "Health check complete: {}/{} healthy, {} outdated, {} with issues, {} unknown",
            state.summary.healthy,
            state.summary.total_projects,
            state.summary.outdated,
            state.summary.with_issues,
            state.summary.unknown_dependencies,
        );
        self.publish(state);

        Ok(summary)
    }
}

/// Run a health check once and return the final state
pub async fn check_account(config: CheckConfig) -> Result<AggregateState> {
    let check = HealthCheck::new(config)?;
    check.run().await?;
    Ok(check.snapshot())
}
