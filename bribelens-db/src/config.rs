//! Pool configuration
//!
//! The connection string and pool bounds are supplied by whoever starts the
//! process; this crate consumes them but does not own their discovery. The
//! `from_env` convenience exists for binaries that follow the usual
//! `DATABASE_URL` convention.

use std::env;

use crate::error::DbError;

/// Lower pool bound when none is given.
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Upper pool bound when none is given.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 15;

/// Connection string plus pool bounds.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            min_connections: DEFAULT_MIN_CONNECTIONS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Build a config from `DATABASE_URL`.
    pub fn from_env() -> Result<Self, DbError> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| DbError::config("DATABASE_URL not set"))?;
        Ok(Self::new(url))
    }
}
