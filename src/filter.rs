//! Which listed repositories take part in a health check

use crate::types::RawProject;

/// Language a repository must report to be checked. Matched case-sensitively.
pub const TARGET_LANGUAGE: &str = "JavaScript";

/// Keep repositories that belong to the account (not forks) and that
/// are likely to have an npm manifest (JavaScript).
pub fn include(project: &RawProject) -> bool {
    !project.fork && project.language.as_deref() == Some(TARGET_LANGUAGE)
}

/// Apply [`include`] to a listing, preserving its order
pub fn filter_projects(projects: Vec<RawProject>) -> Vec<RawProject> {
    projects.into_iter().filter(include).collect()
}
