use std::path::PathBuf;
use std::time::Duration;

use marquee_catalog::omdb::{BASE_URL, OmdbConfig};
use thiserror::Error;

const DEFAULT_BIND: &str = "127.0.0.1:8097";
const DEFAULT_DB: &str = "marquee.db";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where favorites are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite(String),
    JsonDir(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub omdb: OmdbConfig,
    pub store: StoreBackend,
    pub bind: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = var("OMDB_API_KEY").ok_or(ConfigError::Missing("OMDB_API_KEY"))?;

        let timeout_secs = match var("MARQUEE_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid {
                    name: "MARQUEE_HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let store = match var("MARQUEE_STORE_DIR") {
            Some(dir) => StoreBackend::JsonDir(dir.into()),
            None => StoreBackend::Sqlite(var("MARQUEE_DB").unwrap_or_else(|| DEFAULT_DB.into())),
        };

        let log_format = match var("MARQUEE_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "MARQUEE_LOG_FORMAT",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            omdb: OmdbConfig {
                base_url: var("MARQUEE_OMDB_URL").unwrap_or_else(|| BASE_URL.into()),
                timeout: Duration::from_secs(timeout_secs),
                ..OmdbConfig::new(api_key)
            },
            store,
            bind: var("MARQUEE_BIND").unwrap_or_else(|| DEFAULT_BIND.into()),
            log_format,
        })
    }
}
