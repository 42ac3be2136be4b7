//! CLI tool for checking the health of an account's projects

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use repo_health_check::{
    dependency_status, has_issues, is_healthy, AggregateState, CheckConfig, DependencyStatus,
    HealthCheck, Project, RunSummary,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "health-check")]
#[command(about = "Check dependency freshness and open issues across an account's JavaScript projects", long_about = None)]
#[command(version)]
struct Cli {
    /// GitHub account whose repositories are checked
    #[arg(short = 'a', long)]
    account: Option<String>,

    /// Path to custom configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Skip fetching dependency status
    #[arg(long)]
    no_deps: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the health check and display a summary
    Scan {
        /// Display one line per project
        #[arg(long)]
        detailed: bool,
    },

    /// Generate a health report
    Report {
        /// Output format
        #[arg(short = 'f', long, default_value = "markdown")]
        format: ReportFormat,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Exit with an error if any project has outdated dependencies
    Check {
        /// Also fail when any project has open issues
        #[arg(long)]
        fail_on_issues: bool,
    },
}

#[derive(Clone, Debug)]
enum ReportFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    let check = match HealthCheck::new(config) {
        Ok(check) => check,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Checking projects...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = check.run().await;

    spinner.finish_and_clear();

    let run = match result {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{} Health check failed: {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };
    let state = check.snapshot();

    match cli.command {
        Commands::Scan { detailed } => {
            display_summary(&state, &run);

            if detailed {
                println!();
                display_detailed(&state);
            }
        }

        Commands::Report { format, output } => {
            let content = match format {
                ReportFormat::Json => generate_json_report(&state),
                ReportFormat::Markdown => generate_markdown_report(&state),
            };

            if let Some(output_path) = output {
                match std::fs::write(&output_path, content) {
                    Ok(_) => println!("Report written to: {}", output_path.display()),
                    Err(e) => {
                        eprintln!("{} Failed to write report: {}", "Error:".red().bold(), e);
                        process::exit(1);
                    }
                }
            } else {
                println!("{}", content);
            }
        }

        Commands::Check { fail_on_issues } => {
            let mut failures = Vec::new();

            for project in &state.projects {
                if dependency_status(project) == DependencyStatus::Outdated {
                    failures.push(format!(
                        "  - {}: {} outdated dependencies",
                        project.name(),
                        project
                            .dependencies()
                            .map(|d| d.totals.out_of_date)
                            .unwrap_or(0)
                    ));
                }

                if fail_on_issues && has_issues(project) {
                    failures.push(format!(
                        "  - {}: {} open issues",
                        project.name(),
                        project.raw.open_issues_count
                    ));
                }
            }

            if !failures.is_empty() {
                eprintln!("{} {} check failures:", "Failed:".red().bold(), failures.len());
                for failure in failures {
                    eprintln!("{}", failure);
                }
                process::exit(1);
            } else {
                println!("{} All checks passed!", "Success:".green().bold());
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<CheckConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CheckConfig::default(),
    };

    if let Some(account) = &cli.account {
        config.options.account = account.clone();
    }
    if cli.no_deps {
        config.options.fetch_dependencies = false;
    }

    Ok(config)
}

fn load_config(path: &Path) -> anyhow::Result<CheckConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    CheckConfig::from_toml(&content)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

fn percent(count: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        count as f32 / total as f32 * 100.0
    }
}

fn display_summary(state: &AggregateState, run: &RunSummary) {
    let summary = &state.summary;

    println!("\n{}", "=== Health Summary ===".bold());
    println!("Account: {}", state.options.account.cyan());
    println!(
        "Projects: {} checked ({} repositories listed)",
        summary.total_projects, run.listed
    );
    println!();

    println!(
        "  {} {} ({:.1}%)",
        "●".green(),
        format!("Healthy: {}", summary.healthy).green(),
        percent(summary.healthy, summary.total_projects)
    );
    println!(
        "  {} {} ({:.1}%)",
        "●".red(),
        format!("Outdated: {}", summary.outdated).red(),
        percent(summary.outdated, summary.total_projects)
    );
    println!(
        "  {} {} ({:.1}%)",
        "●".yellow(),
        format!("With issues: {}", summary.with_issues).yellow(),
        percent(summary.with_issues, summary.total_projects)
    );
    if state.options.fetch_dependencies {
        println!(
            "  {} Dependency status unknown: {}",
            "●".dimmed(),
            summary.unknown_dependencies
        );
    }
    println!();

    if state.any_outdated {
        println!("{}", "Some projects have outdated dependencies".red());
    }
    if state.any_has_issues {
        println!("{}", "Some projects have open issues".yellow());
    }
    if run.enrichment_failures > 0 {
        println!(
            "{} dependency status requests failed",
            run.enrichment_failures
        );
    }
}

fn display_detailed(state: &AggregateState) {
    println!("{}", "=== Projects ===".bold());

    for project in &state.projects {
        let status = dependency_status(project);
        let status_str = match status {
            DependencyStatus::Current => status.to_string().green(),
            DependencyStatus::Outdated => status.to_string().red(),
            DependencyStatus::Unknown => status.to_string().dimmed(),
        };

        println!(
            "\n{} [{}] Popularity: {}",
            project.name().bold(),
            status_str,
            project.popularity_score.unwrap_or(0)
        );

        if let Some(deps) = project.dependencies() {
            println!(
                "  Dependencies: {}/{} up to date",
                deps.totals.up_to_date, deps.totals.total
            );
        }
        if let Some(url) = project.status_page_url() {
            println!("  Status page: {}", url);
        }
        if has_issues(project) {
            println!(
                "  {}",
                format!("Open issues: {}", project.raw.open_issues_count).yellow()
            );
        }
        if is_healthy(project) {
            println!("  {}", "Healthy".green());
        }
    }
}

fn generate_json_report(state: &AggregateState) -> String {
    serde_json::to_string_pretty(state).unwrap_or_else(|e| {
        eprintln!("Failed to serialize report: {}", e);
        process::exit(1);
    })
}

fn markdown_row(project: &Project) -> String {
    let deps = project
        .dependencies()
        .map(|d| format!("{}/{}", d.totals.up_to_date, d.totals.total))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "| {} | {} | {} | {} | {} | {} |\n",
        project.name(),
        dependency_status(project),
        deps,
        project.raw.open_issues_count,
        project.popularity_score.unwrap_or(0),
        if is_healthy(project) { "yes" } else { "no" }
    )
}

fn generate_markdown_report(state: &AggregateState) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Project Health Report: {}\n\n", state.options.account));
    if let Some(completed_at) = state.completed_at {
        md.push_str(&format!("**Generated:** {}\n\n", completed_at));
    }

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- Projects: {}\n", state.summary.total_projects));
    md.push_str(&format!("- Healthy: {}\n", state.summary.healthy));
    md.push_str(&format!("- Outdated: {}\n", state.summary.outdated));
    md.push_str(&format!("- With issues: {}\n", state.summary.with_issues));
    md.push_str(&format!(
        "- Unknown dependency status: {}\n\n",
        state.summary.unknown_dependencies
    ));

    md.push_str("## Projects\n\n");
    md.push_str("| Name | Status | Dependencies (up to date/total) | Issues | Popularity | Healthy |\n");
    md.push_str("|------|--------|---------------------------------|--------|------------|---------|\n");

    for project in &state.projects {
        md.push_str(&markdown_row(project));
    }

    md
}
