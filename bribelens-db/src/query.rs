//! Parameterized read-only query execution
//!
//! `run_query` takes a fixed, statically known statement plus positional
//! parameters, and materializes the full result set into a
//! [`bribelens_core::Table`]. The pooled connection is held only for the
//! duration of the fetch and returns to the pool on success and failure alike.

use bribelens_core::{Table, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use crate::error::DbError;
use crate::pool::Db;

/// A positionally bound statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_owned())
    }
}

impl Db {
    /// Execute a fixed read-only statement and materialize every row.
    ///
    /// Returns [`Table::empty`] when the result set has no rows - callers must
    /// check for that before assuming any column is present.
    pub async fn run_query(&self, sql: &str, params: &[SqlParam]) -> Result<Table, DbError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlParam::Int(value) => query.bind(*value),
                SqlParam::Text(value) => query.bind(value.clone()),
            };
        }

        let rows = query.fetch_all(self.pool()).await?;
        let Some(first) = rows.first() else {
            tracing::debug!(sql, "query matched no rows");
            return Ok(Table::empty());
        };

        let mut table = Table::new(first.columns().iter().map(|c| c.name()));
        for row in &rows {
            table.push_row(decode_row(row)?);
        }
        tracing::debug!(sql, rows = table.len(), "query materialized");
        Ok(table)
    }
}

fn decode_row(row: &PgRow) -> Result<Vec<Value>, DbError> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| decode_value(row, idx, column))
        .collect()
}

/// Decode one cell by its Postgres type name.
///
/// The statements in this workspace cast `NUMERIC` amounts to
/// `double precision` at the SQL level, so the decoder only needs the types
/// those statements can produce. Anything else is surfaced as
/// [`DbError::UnsupportedColumn`] rather than silently nulled.
fn decode_value(row: &PgRow, idx: usize, column: &PgColumn) -> Result<Value, DbError> {
    let raw = row.try_get_raw(idx).map_err(DbError::from)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let ty = raw.type_info().name().to_owned();
    let value = match ty.as_str() {
        "BOOL" => Value::Bool(row.try_get::<bool, _>(idx)?),
        "INT2" => Value::Int(row.try_get::<i16, _>(idx)?.into()),
        "INT4" => Value::Int(row.try_get::<i32, _>(idx)?.into()),
        "INT8" => Value::Int(row.try_get::<i64, _>(idx)?),
        "FLOAT4" => Value::Float(row.try_get::<f32, _>(idx)?.into()),
        "FLOAT8" => Value::Float(row.try_get::<f64, _>(idx)?),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Value::Text(row.try_get::<String, _>(idx)?),
        "DATE" => Value::Date(row.try_get::<NaiveDate, _>(idx)?),
        "TIMESTAMP" => {
            let naive = row.try_get::<NaiveDateTime, _>(idx)?;
            Value::Timestamp(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
        }
        "TIMESTAMPTZ" => Value::Timestamp(row.try_get::<DateTime<Utc>, _>(idx)?),
        _ => {
            return Err(DbError::UnsupportedColumn {
                column: column.name().to_owned(),
                ty,
            })
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p bribelens-db -- --ignored

    async fn connect() -> Db {
        let config = DbConfig::from_env().expect("DATABASE_URL required");
        Db::connect(&config).await.expect("pool creation failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn materializes_named_columns() {
        let db = connect().await;
        let table = db
            .run_query(
                "SELECT * FROM (VALUES (1, 'a'), (2, 'b')) AS t(n, label)",
                &[],
            )
            .await
            .expect("query failed");

        assert_eq!(table.columns(), &["n".to_string(), "label".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, "label").and_then(Value::as_str), Some("b"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn empty_result_is_the_empty_sentinel() {
        let db = connect().await;
        let table = db
            .run_query("SELECT 1 AS n WHERE FALSE", &[])
            .await
            .expect("query failed");
        assert_eq!(table, Table::empty());
        assert!(table.columns().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn params_bind_positionally() {
        let db = connect().await;
        let table = db
            .run_query(
                "SELECT $1::int8 AS n, $2::text AS label",
                &[SqlParam::Int(7), SqlParam::Text("x".into())],
            )
            .await
            .expect("query failed");
        assert_eq!(table.value(0, "n").and_then(Value::as_i64), Some(7));
        assert_eq!(table.value(0, "label").and_then(Value::as_str), Some("x"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn decodes_dates_and_nulls() {
        let db = connect().await;
        let table = db
            .run_query("SELECT DATE '2023-01-15' AS doi UNION ALL SELECT NULL", &[])
            .await
            .expect("query failed");
        let dates: Vec<Option<NaiveDate>> = table
            .column_values("doi")
            .unwrap()
            .map(Value::as_date)
            .collect();
        assert_eq!(
            dates,
            vec![NaiveDate::from_ymd_opt(2023, 1, 15), None]
        );
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn uncast_numeric_is_rejected_loudly() {
        let db = connect().await;
        let err = db
            .run_query("SELECT 1::numeric AS n", &[])
            .await
            .expect_err("NUMERIC should not decode");
        assert!(matches!(err, DbError::UnsupportedColumn { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn failing_queries_do_not_deplete_pool() {
        let config = DbConfig::from_env()
            .expect("DATABASE_URL required")
            .max_connections(2);
        let db = Db::connect(&config).await.expect("pool creation failed");

        // More failures than pool slots; every connection must come back
        for _ in 0..8 {
            let err = db
                .run_query("SELECT nothing FROM missing_table", &[])
                .await;
            assert!(err.is_err());
        }

        let table = db
            .run_query("SELECT 1 AS n", &[])
            .await
            .expect("pool should still serve queries");
        assert_eq!(table.value(0, "n").and_then(Value::as_i64), Some(1));
    }
}
