//! Core data types for project health reporting

use crate::config::CheckOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository as returned by the listing API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProject {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub owner: Option<ProjectOwner>,
    #[serde(default)]
    pub fork: bool,
    /// Primary language; GitHub reports `null` when it cannot tell
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub watchers_count: u32,
    #[serde(default)]
    pub open_issues_count: u32,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Owning account of a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOwner {
    pub login: String,
}

/// Dependency status for one project, as reported by the dependency service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyInfo {
    /// Overall status string (e.g. "uptodate", "outofdate")
    #[serde(default)]
    pub status: Option<String>,
    pub totals: DependencyTotals,
    /// Page showing the dependency status for humans
    #[serde(default)]
    pub status_page_url: Option<String>,
    /// Provider fields passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Dependency counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyTotals {
    pub up_to_date: u32,
    pub out_of_date: u32,
    /// `up_to_date + out_of_date`, filled in on enrichment
    #[serde(default)]
    pub total: u32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Where a project stands with respect to dependency enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Enrichment {
    /// Dependency data was not requested for this run
    Skipped,
    /// The dependency request failed; status is unknown
    Failed { reason: String },
    /// Dependency data merged onto the project
    Enriched { dependencies: DependencyInfo },
}

/// The working entity: a listed project plus whatever was learned about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub raw: RawProject,
    pub enrichment: Enrichment,
    /// `forks + stars + watchers`, set once all enrichments have settled
    pub popularity_score: Option<u32>,
}

/// Tri-state view of a project's dependency freshness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    /// No dependency data (not requested, or the request failed)
    Unknown,
    Current,
    Outdated,
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Current => write!(f, "Up to date"),
            Self::Outdated => write!(f, "Outdated"),
        }
    }
}

impl Project {
    /// Wrap a freshly listed project; nothing is known about its dependencies yet
    pub fn new(raw: RawProject) -> Self {
        Self {
            raw,
            enrichment: Enrichment::Skipped,
            popularity_score: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.raw.name
    }

    /// Merged dependency data, if enrichment succeeded
    pub fn dependencies(&self) -> Option<&DependencyInfo> {
        match &self.enrichment {
            Enrichment::Enriched { dependencies } => Some(dependencies),
            _ => None,
        }
    }

    /// Total dependency count; absent when no dependency data is attached
    pub fn total_dependency_count(&self) -> Option<u32> {
        self.dependencies().map(|d| d.totals.total)
    }

    pub fn status_page_url(&self) -> Option<&str> {
        self.dependencies()
            .and_then(|d| d.status_page_url.as_deref())
    }
}

/// Aggregate view over every project of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateState {
    /// Options the state was produced with
    pub options: CheckOptions,
    /// Projects in listing order
    pub projects: Vec<Project>,
    pub any_outdated: bool,
    pub any_has_issues: bool,
    /// Counts, computed together with the summary booleans
    pub summary: HealthSummary,
    /// Set when the aggregate stage has completed
    pub completed_at: Option<DateTime<Utc>>,
}

/// Summary counts for an aggregate state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total_projects: usize,
    pub healthy: usize,
    pub outdated: usize,
    pub with_issues: usize,
    pub unknown_dependencies: usize,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Repositories returned by the listing API
    pub listed: usize,
    /// Repositories kept by the filter
    pub included: usize,
    pub enriched: usize,
    pub enrichment_failures: usize,
}

impl AggregateState {
    /// Empty state for the given options
    pub fn new(options: CheckOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Whether stats have been computed for this state
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_project_from_listing_json() {
        let json = r#"{
            "id": 1296269,
            "name": "swagger-parser",
            "owner": { "login": "bigstickcarpet" },
            "fork": false,
            "language": "JavaScript",
            "forks_count": 3,
            "stargazers_count": 40,
            "watchers_count": 40,
            "open_issues_count": 2,
            "html_url": "https://github.com/bigstickcarpet/swagger-parser",
            "description": null,
            "private": false
        }"#;

        let raw: RawProject = serde_json::from_str(json).unwrap();
        assert_eq!(raw.name, "swagger-parser");
        assert_eq!(raw.owner.unwrap().login, "bigstickcarpet");
        assert_eq!(raw.language.as_deref(), Some("JavaScript"));
        assert_eq!(raw.stargazers_count, 40);
    }

    #[test]
    fn test_null_language() {
        let raw: RawProject =
            serde_json::from_str(r#"{"name": "dotfiles", "language": null}"#).unwrap();
        assert_eq!(raw.language, None);
        assert!(!raw.fork);
    }

    #[test]
    fn test_dependency_info_keeps_provider_fields() {
        let json = r#"{
            "status": "outofdate",
            "deps": [{ "name": "lodash" }],
            "totals": {
                "upToDate": 8,
                "outOfDate": 2,
                "pinned": { "latest": 0, "outOfDate": 0 }
            }
        }"#;

        let info: DependencyInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.totals.up_to_date, 8);
        assert_eq!(info.totals.out_of_date, 2);
        assert!(info.extra.contains_key("deps"));
        assert!(info.totals.extra.contains_key("pinned"));
    }

    #[test]
    fn test_new_project_has_no_dependency_fields() {
        let raw: RawProject = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        let project = Project::new(raw);
        assert_eq!(project.total_dependency_count(), None);
        assert_eq!(project.status_page_url(), None);
        assert_eq!(project.popularity_score, None);
    }
}
