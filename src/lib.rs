//! # repo_health_check
//!
//! Health overview of a GitHub account's JavaScript projects:
//! - **Dependency freshness**: up-to-date and outdated dependency counts per project
//! - **Open issues**: which projects have issues waiting
//! - **Popularity**: forks + stars + watchers
//!
//! ## Quick Start
//!
//! ```no_run
//! use repo_health_check::{is_healthy, CheckConfig, HealthCheck};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = CheckConfig::builder().account("octocat").build();
//! let check = HealthCheck::new(config)?;
//! check.run().await?;
//!
//! for project in check.snapshot().projects {
//!     println!("{}: healthy = {}", project.name(), is_healthy(&project));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## How a run works
//!
//! 1. List the account's repositories (one page)
//! 2. Keep non-fork JavaScript projects, in listing order
//! 3. Fetch dependency status for all of them concurrently; a failed
//!    request only leaves that project's status unknown
//! 4. Compute popularity and the aggregate flags

mod config;
mod enrich;
mod error;
mod filter;
mod metadata;
mod pipeline;
mod stats;
mod types;

// Re-export public API
pub use config::{CheckConfig, CheckConfigBuilder, CheckOptions, NetworkConfig};
pub use enrich::{enrich, enrich_all};
pub use error::{HealthCheckError, Result};
pub use filter::{include, TARGET_LANGUAGE};
pub use pipeline::{check_account, HealthCheck};
pub use stats::{calculate_stats, dependency_status, has_issues, is_healthy, is_outdated, popularity};
pub use types::{
    AggregateState, DependencyInfo, DependencyStatus, DependencyTotals, Enrichment, HealthSummary,
    Project, ProjectOwner, RawProject, RunSummary,
};
