use std::sync::Arc;

use crate::client::JiraClient;
use crate::config::{load_config, resolve_credentials, Config, Credentials};
use crate::error::SummarizerResult;

/// Central context for CLI operations, managing configuration and client instances
pub struct CliContext {
    config: Config,
    username_flag: Option<String>,
    credentials: Option<Credentials>,
    client: Option<Arc<JiraClient>>,
}

impl CliContext {
    /// Load context from the saved configuration file
    pub fn load(username_flag: Option<String>) -> SummarizerResult<Self> {
        Ok(Self {
            config: load_config()?,
            username_flag,
            credentials: None,
            client: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve credentials, loading them from flags, environment and config if necessary
    pub fn credentials(&mut self) -> SummarizerResult<&Credentials> {
        let credentials = match self.credentials.take() {
            Some(credentials) => credentials,
            None => resolve_credentials(&self.config, self.username_flag.as_deref())?,
        };

        Ok(self.credentials.insert(credentials))
    }

    /// Get or create an authenticated client
    pub fn verified_client(&mut self) -> SummarizerResult<Arc<JiraClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let credentials = self.credentials()?.clone();
        let client = Arc::new(JiraClient::new(
            &credentials.base_url,
            credentials.username,
            credentials.api_token,
        )?);
        self.client = Some(client.clone());
        Ok(client)
    }
}

/// Builder for contexts with injected configuration or credentials
pub struct CliContextBuilder {
    config: Config,
    credentials: Option<Credentials>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            credentials: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> CliContext {
        CliContext {
            config: self.config,
            username_flag: None,
            credentials: self.credentials,
            client: None,
        }
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
