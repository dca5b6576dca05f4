//! Runtime configuration from environment variables and an optional `.env` file.
//!
//! | variable | default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `DATABASE_URL` | `postgres://localhost/resources` |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `RESOURCE_STORE` | `postgres` (or `memory`) |

use crate::error::ConfigError;
use std::collections::HashMap;
use std::str::FromStr;

/// Which `ResourceStore` backs the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub store: StoreBackend,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".into(),
            port: 3000,
            database_url: "postgres://localhost/resources".into(),
            max_connections: 5,
            store: StoreBackend::Postgres,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    /// Build from an explicit variable map; unset variables keep their defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Some(host) = vars.get("HOST") {
            config.host = host.clone();
        }
        if let Some(port) = vars.get("PORT") {
            config.port = parse("PORT", port)?;
        }
        if let Some(url) = vars.get("DATABASE_URL") {
            config.database_url = url.clone();
        }
        if let Some(max) = vars.get("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = parse("DATABASE_MAX_CONNECTIONS", max)?;
        }
        if let Some(store) = vars.get("RESOURCE_STORE") {
            config.store = store.parse()?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
