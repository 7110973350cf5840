//! Server configuration from environment variables (a `.env` file is honoured by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/resources";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_TABLE: &str = "resources";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub backend: StoreBackend,
    /// Must be a plain identifier; it is interpolated (quoted) into SQL.
    pub table: String,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidValue {
            key: "BIND_ADDR",
            reason: format!("{}: {}", bind_raw, e),
        })?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "DATABASE_MAX_CONNECTIONS",
                        reason: format!("expected a positive integer, got '{}'", raw),
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let backend = match get("STORE_BACKEND").map(|s| s.to_lowercase()).as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let table = get("RESOURCE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.into());
        if !is_identifier(&table) {
            return Err(ConfigError::InvalidValue {
                key: "RESOURCE_TABLE",
                reason: format!("'{}' is not a valid identifier", table),
            });
        }

        let body_limit_bytes = match get("BODY_LIMIT_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                key: "BODY_LIMIT_BYTES",
                reason: format!("expected a byte count, got '{}'", raw),
            })?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        Ok(ServerConfig {
            database_url,
            bind_addr,
            max_connections,
            backend,
            table,
            body_limit_bytes,
        })
    }
}

/// ASCII letters, digits and underscores, not starting with a digit, at most 63 bytes.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
