//! Integration tests for the CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const LISTING: &str = r#"[
    {"name": "swagger-parser", "fork": false, "language": "JavaScript",
     "forks_count": 2, "stargazers_count": 10, "watchers_count": 10, "open_issues_count": 0},
    {"name": "json-schema-lib", "fork": false, "language": "JavaScript",
     "forks_count": 0, "stargazers_count": 1, "watchers_count": 1, "open_issues_count": 3},
    {"name": "forked", "fork": true, "language": "JavaScript"},
    {"name": "scripts", "fork": false, "language": "Python"}
]"#;

fn config_file(server: &mockito::ServerGuard) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[options]
account = "octocat"

[network]
listing_api_url = "{url}"
dependency_api_url = "{url}"
"#,
        url = server.url()
    )
    .unwrap();
    file
}

fn mock_account(server: &mut mockito::ServerGuard) -> Vec<mockito::Mock> {
    vec![
        server
            .mock("GET", "/users/octocat/repos")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .create(),
        server
            .mock("GET", "/octocat/swagger-parser/info.json")
            .with_status(200)
            .with_body(r#"{"status": "outofdate", "totals": {"upToDate": 8, "outOfDate": 2}}"#)
            .create(),
        server
            .mock("GET", "/octocat/json-schema-lib/info.json")
            .with_status(500)
            .create(),
    ]
}

#[test]
fn test_cli_scan_help() {
    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("scan").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Run the health check"));
}

#[test]
fn test_cli_report_help() {
    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("report").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generate a health report"));
}

#[test]
fn test_cli_requires_account() {
    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("scan");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("account must not be empty"));
}

#[test]
fn test_cli_scan_against_mock_server() {
    let mut server = mockito::Server::new();
    let _mocks = mock_account(&mut server);
    let config = config_file(&server);

    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("--config").arg(config.path()).arg("scan").arg("--detailed");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Health Summary"))
        .stdout(predicate::str::contains("swagger-parser"))
        .stdout(predicate::str::contains("scripts").not())
        .stdout(predicate::str::contains("1 dependency status requests failed"));
}

#[test]
fn test_cli_report_json() {
    let mut server = mockito::Server::new();
    let _mocks = mock_account(&mut server);
    let config = config_file(&server);

    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("--config")
        .arg(config.path())
        .arg("report")
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"any_outdated\": true"))
        .stdout(predicate::str::contains("\"total\": 10"));
}

#[test]
fn test_cli_check_fails_on_outdated() {
    let mut server = mockito::Server::new();
    let _mocks = mock_account(&mut server);
    let config = config_file(&server);

    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("--config").arg(config.path()).arg("check");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("swagger-parser: 2 outdated dependencies"));
}

#[test]
fn test_cli_check_passes_without_deps() {
    let mut server = mockito::Server::new();
    let _mocks = mock_account(&mut server);
    let config = config_file(&server);

    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("--config")
        .arg(config.path())
        .arg("--no-deps")
        .arg("check");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn test_cli_listing_failure() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/users/octocat/repos")
        .with_status(404)
        .create();
    let config = config_file(&server);

    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("--config").arg(config.path()).arg("scan");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Health check failed"));
}

#[test]
fn test_cli_report_markdown() {
    let mut server = mockito::Server::new();
    let _mocks = mock_account(&mut server);
    let config = config_file(&server);

    let mut cmd = Command::cargo_bin("health-check").unwrap();
    cmd.arg("--config").arg(config.path()).arg("report");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "| Name | Status | Dependencies (up to date/total) | Issues | Popularity | Healthy |",
        ))
        .stdout(predicate::str::contains(
            "| swagger-parser | Outdated | 8/10 | 0 | 22 | no |",
        ))
        .stdout(predicate::str::contains(
            "| json-schema-lib | Unknown | - | 3 | 2 | no |",
        ));
}
