//! Connection settings shared by every command.

use clap::Args;
use std::time::Duration;

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://api.resy.com";

/// Resy API connection settings, flattened into each command's arguments.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Resy API key, sent as `ResyAPI api_key="..."`.
    #[arg(long, env = "RESY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Auth token of the logged-in Resy user.
    #[arg(long, env = "RESY_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Base URL of the Resy API.
    #[arg(long, env = "RESY_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Request timeout in seconds.
    #[arg(long, env = "RESY_TIMEOUT", default_value = "30")]
    pub timeout: u64,
}

impl ApiArgs {
    /// Settings pointing at `api_base` with no credentials.
    pub fn with_base(api_base: impl Into<String>) -> Self {
        Self {
            api_key: None,
            auth_token: None,
            api_base: api_base.into(),
            timeout: 30,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
