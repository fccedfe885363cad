use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Connect timeout used when a profile does not set one.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Full configuration file: named Jira profiles plus the default choice.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Load configuration from the provided path or the default config file.
    /// A missing file yields an empty configuration.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Unable to read config file at {}", path.display()))?;

        serde_yaml::from_str(&raw)
            .with_context(|| format!("Malformed YAML in config file {}", path.display()))
    }

    /// Returns the requested profile, else the default one, else the first
    /// profile by name.
    pub fn resolve_profile<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Option<(&'a str, &'a Profile)> {
        if let Some(name) = requested {
            self.profiles.get(name).map(|profile| (name, profile))
        } else if let Some(default_name) = self.default_profile.as_deref() {
            self.profiles
                .get(default_name)
                .map(|profile| (default_name, profile))
        } else {
            self.profiles
                .iter()
                .next()
                .map(|(name, profile)| (name.as_str(), profile))
        }
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".jiralink");
        path.push("config.yaml");
        path
    }
}

/// Connection settings for one Jira instance. Values are optional so the
/// token can live in the environment instead of the file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Profile {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub api_token: Option<String>,
    pub connect_timeout_secs: Option<u64>,
}

impl Profile {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }
}
