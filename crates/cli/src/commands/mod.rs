use anyhow::{Context, Result};
use jiralink_api::{Issue, JiraClient};
use jiralink_output::{OutputFormat, OutputRenderer};
use serde_json::{Map, Value};

pub async fn show_issue(
    client: &JiraClient,
    renderer: &OutputRenderer,
    key: &str,
    fields: &[String],
) -> Result<()> {
    let issue = client
        .get_issue(key, fields)
        .await
        .with_context(|| format!("Failed to fetch issue {key}"))?;

    match renderer.format() {
        OutputFormat::Table => renderer.render(&issue_row(&issue)),
        _ => renderer.render(&issue),
    }
}

pub async fn project_title(
    client: &JiraClient,
    renderer: &OutputRenderer,
    key: &str,
) -> Result<()> {
    let title = client
        .get_project_title(key)
        .await
        .with_context(|| format!("Failed to fetch project {key}"))?;

    renderer.render(&title)
}

pub async fn add_comment(client: &JiraClient, issue: &str, message: &str) -> Result<()> {
    client
        .comment(issue, message)
        .await
        .with_context(|| format!("Failed to comment on {issue}"))?;

    tracing::info!(issue, "Comment added");
    println!("Comment added to {issue}");
    Ok(())
}

/// Flat view for table output: typed attributes first, then every returned
/// field under `fields.<name>`.
fn issue_row(issue: &Issue) -> Map<String, Value> {
    let mut row = Map::new();
    row.insert("id".to_string(), Value::String(issue.id.clone()));
    row.insert("key".to_string(), Value::String(issue.key.clone()));
    row.insert("project".to_string(), Value::String(issue.project.clone()));
    row.insert(
        "summary".to_string(),
        issue.summary.clone().map(Value::String).unwrap_or(Value::Null),
    );
    for (name, value) in &issue.fields {
        if name != "summary" {
            row.insert(format!("fields.{name}"), value.clone());
        }
    }
    row
}
