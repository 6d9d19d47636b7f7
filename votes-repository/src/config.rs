//! Connection configuration for the PostgreSQL votes repository.

use std::env;

use dotenv::dotenv;

use crate::errors::ConfigError;

/// Default size of the connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings for `PostgresVoteRepository`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl PostgresConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Reads the configuration from the environment, loading `.env` first.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `VOTES_DB_MAX_CONNECTIONS`: pool size (default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let max_connections = match env::var("VOTES_DB_MAX_CONNECTIONS") {
            Ok(value) => value.parse::<u32>().map_err(|_| ConfigError::InvalidVar {
                name: "VOTES_DB_MAX_CONNECTIONS",
                value,
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}
