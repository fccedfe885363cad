mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use jiralink_api::error::ApiError;
use jiralink_api::JiraClient;
use jiralink_config::Config;
use jiralink_output::{OutputFormat, OutputRenderer};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "jiralink", version, about = "Minimal Jira REST client", long_about = None)]
struct Cli {
    /// Profile to use from config file
    #[arg(short, long)]
    profile: Option<String>,

    /// Path to config file (defaults to ~/.jiralink/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for command results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Connect timeout in seconds, overriding the profile
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: JiraCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum JiraCommand {
    /// Show an issue
    Issue {
        /// Issue key, e.g. PROJ-123
        key: String,
        /// Fields to request, comma separated
        #[arg(long, value_delimiter = ',', default_value = "summary")]
        fields: Vec<String>,
    },
    /// Print the display title of a project
    Project {
        /// Project key, e.g. PROJ
        key: String,
    },
    /// Add a comment to an issue
    Comment {
        /// Issue key, e.g. PROJ-123
        issue: String,
        /// Comment text
        message: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.debug) {
        eprintln!("{} {err}", "warning:".yellow().bold());
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            if let Some(hint) = err.downcast_ref::<ApiError>().and_then(ApiError::suggestion) {
                eprintln!("{} {hint}", "hint:".cyan());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_ref())?;
    let renderer = OutputRenderer::new(cli.output);
    let profile = resolve_active_profile(&config, cli.profile.as_deref(), cli.timeout)?;
    let client = build_client(&profile)?;

    match cli.command {
        JiraCommand::Issue { key, fields } => {
            commands::show_issue(&client, &renderer, &key, &fields).await
        }
        JiraCommand::Project { key } => commands::project_title(&client, &renderer, &key).await,
        JiraCommand::Comment { issue, message } => {
            commands::add_comment(&client, &issue, &message).await
        }
    }
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug {
        "warn,jiralink=debug,jiralink_api=debug,jiralink_config=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logger: {err}"))
}

#[derive(Debug)]
struct ActiveProfile {
    base_url: String,
    username: String,
    token: String,
    connect_timeout: Duration,
}

fn resolve_active_profile(
    config: &Config,
    requested: Option<&str>,
    timeout_override: Option<u64>,
) -> Result<ActiveProfile> {
    let (name, profile) = config.resolve_profile(requested).ok_or_else(|| match requested {
        Some(name) => anyhow!("Profile '{name}' not found in config."),
        None => anyhow!("No profile configured. Add one to {}", Config::default_path().display()),
    })?;

    let base_url = profile
        .base_url
        .clone()
        .ok_or_else(|| anyhow!("Profile '{name}' is missing a base_url."))?;
    let username = profile
        .username
        .clone()
        .ok_or_else(|| anyhow!("Profile '{name}' is missing a username."))?;

    // Token lookup: profile-specific env var, generic env var, config file
    let profile_env_var = format!("JIRALINK_TOKEN_{}", name.to_uppercase());
    let token = non_empty_env(&profile_env_var)
        .or_else(|| non_empty_env("JIRALINK_API_TOKEN"))
        .or_else(|| profile.api_token.clone())
        .ok_or_else(|| {
            anyhow!("No token found for profile '{name}'. Set {profile_env_var} or api_token in the config file.")
        })?;

    let connect_timeout = timeout_override
        .map(Duration::from_secs)
        .unwrap_or_else(|| profile.connect_timeout());

    Ok(ActiveProfile {
        base_url,
        username,
        token,
        connect_timeout,
    })
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|t| !t.trim().is_empty())
}

fn build_client(profile: &ActiveProfile) -> Result<JiraClient> {
    Ok(JiraClient::new(
        &profile.base_url,
        profile.username.clone(),
        profile.token.clone(),
        profile.connect_timeout,
    )?)
}
