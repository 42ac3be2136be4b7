//! Derived health flags for projects and project sets

use crate::types::{AggregateState, DependencyStatus, HealthSummary, Project};
use tracing::debug;

/// Are the project's dependencies outdated?
///
/// A project without dependency data reads as not outdated; use
/// [`dependency_status`] to tell "unknown" apart from "current".
pub fn is_outdated(project: &Project) -> bool {
    project
        .dependencies()
        .is_some_and(|d| d.totals.out_of_date > 0)
}

/// Does the project have open issues?
pub fn has_issues(project: &Project) -> bool {
    project.raw.open_issues_count > 0
}

/// No outdated dependencies and no open issues
pub fn is_healthy(project: &Project) -> bool {
    !is_outdated(project) && !has_issues(project)
}

pub fn dependency_status(project: &Project) -> DependencyStatus {
    match project.dependencies() {
        None => DependencyStatus::Unknown,
        Some(_) if is_outdated(project) => DependencyStatus::Outdated,
        Some(_) => DependencyStatus::Current,
    }
}

/// Popularity is forks + stars + watchers
pub fn popularity(project: &Project) -> u32 {
    project
        .raw
        .forks_count
        .saturating_add(project.raw.stargazers_count)
        .saturating_add(project.raw.watchers_count)
}

/// Compute per-project popularity and the aggregate flags.
///
/// Recomputes everything from the current project fields, so calling it
/// twice on the same state yields the same result.
pub fn calculate_stats(state: &mut AggregateState) {
    for project in &mut state.projects {
        project.popularity_score = Some(popularity(project));
    }

    state.any_outdated = state.projects.iter().any(is_outdated);
    state.any_has_issues = state.projects.iter().any(has_issues);
    state.summary = summarize(&state.projects);

    debug!(
        any_outdated = state.any_outdated,
        any_has_issues = state.any_has_issues,
        summary = ?state.summary,
        "Calculated project stats"
    );
}

/// Count projects per health category
pub fn summarize(projects: &[Project]) -> HealthSummary {
    let mut summary = HealthSummary {
        total_projects: projects.len(),
        ..HealthSummary::default()
    };

    for project in projects {
        if is_healthy(project) {
            summary.healthy += 1;
        }
        if has_issues(project) {
            summary.with_issues += 1;
        }
        match dependency_status(project) {
            DependencyStatus::Outdated => summary.outdated += 1,
            DependencyStatus::Unknown => summary.unknown_dependencies += 1,
            DependencyStatus::Current => {}
        }
    }

    summary
}
