//! Database handle built on sqlx's PgPool
//!
//! Lifecycle: construct once at startup with [`Db::connect`], clone freely
//! (clones share the pool), and call [`Db::close`] at shutdown. Concurrent
//! borrow/return is handled by the pool itself.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;
use crate::error::DbError;

/// Shared handle over the bounded connection pool.
#[derive(Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    /// Create the pool and connect.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        tracing::info!(
            min = config.min_connections,
            max = config.max_connections,
            "connected database pool"
        );
        Ok(Self { pool })
    }

    /// Wrap an externally constructed pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
