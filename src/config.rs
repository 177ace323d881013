//! Process configuration.
//!
//! Settings are read from environment variables through the `config` crate:
//!
//! - `AGENT_URL` (required): public base URL advertised in the agent card
//! - `AGENT_MODE`: `langdock` (default) or `canned`
//! - `LANGDOCK_API_URL`: override for the upstream completion endpoint

use crate::langdock::DEFAULT_API_URL;
use serde::Deserialize;
use std::collections::HashMap;

/// Fixed listening port.
pub const PORT: u16 = 3333;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("AGENT_URL environment variable is required")]
    MissingAgentUrl,

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ::config::ConfigError),
}

/// Which executor configuration the agent runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    /// Forward messages to Langdock; the card requires `X-API-Key`.
    #[default]
    Langdock,
    /// Fixed reply, no security scheme.
    Canned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub agent_url: String,
    pub agent_mode: AgentMode,
    pub langdock_api_url: String,
}

/// Raw environment shape before validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
    agent_url: Option<String>,
    #[serde(default)]
    agent_mode: AgentMode,
    langdock_api_url: Option<String>,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load settings from an explicit variable map instead of the process
    /// environment. Keys are environment variable names.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let raw: RawSettings = ::config::Config::builder()
            .add_source(::config::Environment::default().source(vars))
            .build()?
            .try_deserialize()?;

        let agent_url = raw
            .agent_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingAgentUrl)?;

        let langdock_api_url = raw
            .langdock_api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            agent_url,
            agent_mode: raw.agent_mode,
            langdock_api_url,
        })
    }
}
