//! Data-access error type
//!
//! A failed query is a `DbError` surfaced to the caller as-is. "The query ran
//! and matched nothing" is not an error - that case is the empty `Table`
//! sentinel, and chart builders turn it into their own `NoData` outcome.

use thiserror::Error;

/// Errors from pool construction and query execution.
#[derive(Debug, Error)]
pub enum DbError {
    /// Connectivity or query failure from the driver.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A result column has a Postgres type the decoder does not handle.
    ///
    /// Statements are fixed at compile time, so hitting this means the
    /// statement itself needs a cast (e.g. `NUMERIC` to `double precision`).
    #[error("unsupported column type {ty} for column '{column}'")]
    UnsupportedColumn { column: String, ty: String },

    /// Missing or unusable configuration.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl DbError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
