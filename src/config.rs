use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/tasks";
pub const DEFAULT_TUI_LOG: &str = "tasks-tui.log";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Defaults to an in-memory database that starts empty on every run.
    pub database_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().with_context(|| format!("invalid BIND_ADDR {bind}"))?;
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        Ok(Self { bind_addr, database_url })
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Collection endpoint, e.g. `http://host:3000/tasks`.
    pub api_url: String,
    pub log_file: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("TASKS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            log_file: lookup("TASKS_TUI_LOG").unwrap_or_else(|| DEFAULT_TUI_LOG.to_string()),
        }
    }
}
