use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{
    API_TOKEN_ENV_VAR, CONFIG_EXAMPLE, CONFIG_FILE, DEFAULT_JIRA_URL, URL_ENV_VAR, USERNAME_ENV_VAR,
};
use crate::error::{ErrorContext, SummarizerError, SummarizerResult};
use crate::summarizer_error;

/// Optional settings stored in `~/.jira-summarizer-config.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub api_token: Option<String>,
    pub group: Option<String>,
    pub since: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub base_url: String,
    pub username: String,
    pub api_token: String,
}

pub fn config_path() -> SummarizerResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| SummarizerError::ConfigError("could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

pub fn load_config() -> SummarizerResult<Config> {
    load_config_from(&config_path()?)
}

/// A missing file yields the defaults; an unreadable or invalid one is an error.
pub fn load_config_from(path: &Path) -> SummarizerResult<Config> {
    if !path.exists() {
        info!("No configuration file. Only defaults, environment variables and flags are used.");
        return Ok(Config::default());
    }

    debug!("reading configuration from {}", path.display());
    let config_str =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&config_str)
        .map_err(|e| summarizer_error!(ConfigError, "invalid configuration file {}: {}", path.display(), e))
}

pub fn resolve_credentials(config: &Config, username_flag: Option<&str>) -> SummarizerResult<Credentials> {
    resolve_credentials_with(config, username_flag, |name| env::var(name).ok())
}

/// Flags win over environment variables, which win over the config file.
pub fn resolve_credentials_with<F>(
    config: &Config,
    username_flag: Option<&str>,
    lookup: F,
) -> SummarizerResult<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let base_url = non_empty(lookup(URL_ENV_VAR))
        .or_else(|| non_empty(config.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_JIRA_URL.to_string());
    let username = non_empty(username_flag.map(str::to_string))
        .or_else(|| non_empty(lookup(USERNAME_ENV_VAR)))
        .or_else(|| non_empty(config.username.clone()));
    let api_token = non_empty(lookup(API_TOKEN_ENV_VAR)).or_else(|| non_empty(config.api_token.clone()));

    match (username, api_token) {
        (Some(username), Some(api_token)) => Ok(Credentials {
            base_url,
            username,
            api_token,
        }),
        _ => Err(SummarizerError::MissingCredentials(missing_credentials_help())),
    }
}

fn missing_credentials_help() -> String {
    format!(
        "Please set:\n  * {} (your email)\n  * {} (API token from your Atlassian account)\n\
         You can also store them permanently in ~/{} with:\n\n{}",
        USERNAME_ENV_VAR, API_TOKEN_ENV_VAR, CONFIG_FILE, CONFIG_EXAMPLE
    )
}
