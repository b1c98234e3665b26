use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::constants::{database::DEFAULT_MAX_CONNECTIONS, server};

/// Where tutorials are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("Unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("Unknown log format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Request timeout in seconds
    pub request_timeout: u64,
    pub run_migrations: bool,
    pub metrics_enabled: bool,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: server::DEFAULT_PORT,
            storage_backend: StorageBackend::Memory,
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout: server::DEFAULT_REQUEST_TIMEOUT_SECS,
            run_migrations: true,
            metrics_enabled: false,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend: StorageBackend = parse_or(&lookup, "STORAGE_BACKEND", StorageBackend::Postgres)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(anyhow!(
                "DATABASE_URL environment variable is required when STORAGE_BACKEND=postgres"
            ));
        }

        let max_connections: u32 = parse_or(&lookup, "MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(anyhow!("MAX_CONNECTIONS must be greater than 0"));
        }

        Ok(Config {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&lookup, "PORT", server::DEFAULT_PORT)?,
            storage_backend,
            database_url,
            max_connections,
            request_timeout: parse_or(
                &lookup,
                "REQUEST_TIMEOUT",
                server::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            metrics_enabled: parse_or(&lookup, "METRICS_ENABLED", true)?,
            log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid value for {}: {} ({})", key, raw, e)),
        None => Ok(default),
    }
}
