//! Data-access layer - connection pool and query execution
//!
//! # Design Principles
//!
//! - One bounded `sqlx::PgPool` shared by all requests - no `Arc<Mutex<_>>`
//! - Statements are fixed and statically known; parameters bind positionally
//! - Connections return to the pool on every exit path (RAII acquisition)
//! - Errors propagate unchanged - no retries, no suppression

pub mod config;
pub mod error;
pub mod pool;
pub mod query;

pub use config::DbConfig;
pub use error::DbError;
pub use pool::Db;
pub use query::SqlParam;
