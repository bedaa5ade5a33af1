//! Process configuration, read once from the environment at startup.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

use supplyflow_observability::{LOG_FORMAT_ENV, LogFormat, UnknownLogFormat};

pub const BIND_ADDR_ENV: &str = "SUPPLYFLOW_BIND_ADDR";
pub const SEED_CATALOG_ENV: &str = "SUPPLYFLOW_SEED_CATALOG";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SUPPLYFLOW_BIND_ADDR={value:?} is not a socket address: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("{key}={value:?} is not a boolean (expected true/false/1/0)")]
    Bool { key: &'static str, value: String },

    #[error(transparent)]
    LogFormat(#[from] UnknownLogFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Load the demo restaurant catalog at startup.
    pub seed_catalog: bool,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_catalog: true,
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let seed_catalog = match lookup(SEED_CATALOG_ENV) {
            Some(value) => parse_bool(SEED_CATALOG_ENV, value)?,
            None => true,
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(value) => value.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            seed_catalog,
            log_format,
        })
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Bool { key, value }),
    }
}
