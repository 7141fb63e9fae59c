//! Process configuration from the environment.

use std::path::PathBuf;

use tracing::info;

use crate::error::ConfigError;
use crate::quoting::models::RateTables;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CURRENCY: &str = "USD";

/// Server settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON document replacing the built-in rate tables
    pub rate_tables_path: Option<PathBuf>,
    /// Display currency for every quoted price
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rate_tables_path: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    /// Read `HOST`, `PORT`, `RATE_TABLES_PATH` and `CURRENCY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset or blank values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar {
                    name: "PORT",
                    value: raw.clone(),
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            rate_tables_path: var("RATE_TABLES_PATH").map(PathBuf::from),
            currency: var("CURRENCY")
                .map(|code| code.trim().to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        })
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load rate tables from `rate_tables_path`, or the built-in defaults
    pub fn load_rate_tables(&self) -> Result<RateTables, ConfigError> {
        let Some(path) = &self.rate_tables_path else {
            info!("Using built-in rate tables");
            return Ok(RateTables::default());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let tables = RateTables::from_json_str(&json)?;
        info!("Loaded rate tables from {}", path.display());
        Ok(tables)
    }
}
