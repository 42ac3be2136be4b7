//! Basic example of using the health check API

use repo_health_check::{
    dependency_status, has_issues, is_healthy, is_outdated, CheckConfig, HealthCheck,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let account = std::env::args().nth(1).unwrap_or_else(|| "octocat".to_string());

    // Default network configuration, dependency status enabled
    let config = CheckConfig::builder().account(account).build();
    let check = HealthCheck::new(config)?;

    let run = check.run().await?;
    let state = check.snapshot();

    println!("\n=== Health Check Results ===");
    println!("Account: {}", state.options.account);
    println!(
        "Repositories listed: {}, checked: {}, dependency lookups failed: {}",
        run.listed, run.included, run.enrichment_failures
    );
    println!();

    for project in &state.projects {
        println!(
            "{}: outdated={} issues={} healthy={} deps={} popularity={}",
            project.name(),
            is_outdated(project),
            has_issues(project),
            is_healthy(project),
            dependency_status(project),
            project.popularity_score.unwrap_or(0)
        );
    }

    println!();
    if state.any_outdated {
        println!("⚠  Some projects have outdated dependencies");
    }
    if state.any_has_issues {
        println!("⚠  Some projects have open issues");
    }
    if !state.any_outdated && !state.any_has_issues {
        println!("✓ All projects are healthy!");
    }

    Ok(())
}
