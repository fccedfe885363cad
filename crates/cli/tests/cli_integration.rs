use std::io::Write;
use std::process::Output;

use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "default_profile: test\nprofiles:\n  test:\n    base_url: {}/\n    username: test@example.com\n    api_token: fake-token\n    connect_timeout_secs: 2\n",
        server.uri()
    )
    .unwrap();
    file
}

async fn jiralink(config: &NamedTempFile, args: &[&str]) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_jiralink"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .env_remove("JIRALINK_API_TOKEN")
        .env_remove("JIRALINK_TOKEN_TEST")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to execute jiralink")
}

#[test]
fn test_cli_help() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_jiralink"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("issue"));
    assert!(stdout.contains("project"));
    assert!(stdout.contains("comment"));
}

#[tokio::test]
async fn test_issue_json_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issue/PROJ-7/"))
        .and(query_param("fields", "summary,status"))
        .and(basic_auth("test@example.com", "fake-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10001",
            "key": "PROJ-7",
            "fields": {"summary": "Fix bug", "status": {"name": "Open"}}
        })))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let output = jiralink(
        &config,
        &["--output", "json", "issue", "PROJ-7", "--fields", "summary,status"],
    )
    .await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let issue: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(issue["project"], "proj");
    assert_eq!(issue["summary"], "Fix bug");
    assert_eq!(issue["fields"]["status"]["name"], "Open");
}

#[tokio::test]
async fn test_project_title() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project/PROJ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "My Project"})))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let output = jiralink(&config, &["project", "PROJ"]).await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "My Project");
}

#[tokio::test]
async fn test_comment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issue/ISSUE-1/comment"))
        .and(body_json(json!({"body": "hello"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "5"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let output = jiralink(&config, &["comment", "ISSUE-1", "hello"]).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ISSUE-1"));
}

#[tokio::test]
async fn test_not_found_exits_with_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("whatever"))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let output = jiralink(&config, &["project", "NOPE"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("404 Not Found: Not Found"));
    assert!(stderr.contains("hint:"));
}
