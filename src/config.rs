use std::net::SocketAddr;

use anyhow::{bail, Context};

/// Which `MeetingStore` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => bail!("unknown APP_STORE `{other}` (expected `postgres` or `memory`)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT must be a port number, got `{v}`"))?,
            None => 8080,
        };
        let store = match lookup("APP_STORE") {
            Some(v) => v.parse()?,
            None => StoreBackend::Postgres,
        };
        let database_url = lookup("DATABASE_URL").filter(|v| !v.is_empty());
        if store == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL is required when APP_STORE=postgres");
        }
        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be an integer, got `{v}`"))?,
            None => 10,
        };

        Ok(Self {
            host,
            port,
            store,
            database_url,
            db_max_connections,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
