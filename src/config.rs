use anyhow::{Context, Result, ensure};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "DealApp/1.0";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, applying defaults for
    /// missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("DEAL_FINDER_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("DEAL_FINDER_ADDR must be a socket address like 0.0.0.0:8080")?;

        let timeout_secs: u64 = lookup("DEAL_FINDER_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("DEAL_FINDER_FETCH_TIMEOUT_SECS must be a whole number of seconds")?;
        ensure!(
            timeout_secs > 0,
            "DEAL_FINDER_FETCH_TIMEOUT_SECS must be greater than zero"
        );

        Ok(Self {
            addr,
            fetch_timeout: Duration::from_secs(timeout_secs),
            user_agent: lookup("DEAL_FINDER_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            fetch_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
