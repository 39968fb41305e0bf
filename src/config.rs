use std::env;
use std::net::SocketAddr;

use crate::client::DEFAULT_BASE_URL;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

/// Startup settings, read from `MEALDB_BASE_URL` and `BIND_ADDR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("MEALDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid BIND_ADDR '{}': {}", self.bind_addr, e))
    }
}
