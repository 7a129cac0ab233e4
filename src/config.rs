//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::filters::PageLimits;

/// Where sales records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceConfig {
    /// Exported CSV file, loaded into memory on first use.
    Csv(PathBuf),
    /// SQLite database holding a `sales` table.
    Sqlite {
        url: String,
        max_connections: u32
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (default: 0.0.0.0).
    pub host: String,

    /// HTTP server port (default: 5001).
    pub port: u16,

    /// `DATABASE_URL` selects SQLite, otherwise `SALES_CSV_PATH` (default: ./sales_dataset.csv).
    pub data_source: DataSourceConfig,

    /// How long filter options are cached (default: 300s).
    pub filter_options_ttl: Duration,

    /// Page size bounds (defaults: 10 and 1000).
    pub page_limits: PageLimits,

    /// Log level name (default: info).
    pub log_level: String
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "5001".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let data_source = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                if !url.starts_with("sqlite:") {
                    bail!("DATABASE_URL must be a sqlite: URL, got [{url}]");
                }

                let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

                DataSourceConfig::Sqlite { url, max_connections }
            }
            None => DataSourceConfig::Csv(
                lookup("SALES_CSV_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./sales_dataset.csv"))
            )
        };

        let filter_options_ttl = lookup("FILTER_OPTIONS_TTL_SECS")
            .unwrap_or_else(|| "300".to_string())
            .parse()
            .map(Duration::from_secs)
            .context("FILTER_OPTIONS_TTL_SECS must be a whole number of seconds")?;

        let default_page_size: u32 = lookup("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("DEFAULT_PAGE_SIZE must be a valid u32")?;

        let max_page_size: u32 = lookup("MAX_PAGE_SIZE")
            .unwrap_or_else(|| "1000".to_string())
            .parse()
            .context("MAX_PAGE_SIZE must be a valid u32")?;

        if default_page_size == 0 || max_page_size < default_page_size {
            bail!("page sizes must satisfy 0 < DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE");
        }

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            host,
            port,
            data_source,
            filter_options_ttl,
            page_limits: PageLimits { default_page_size, max_page_size },
            log_level
        })
    }
}
