//! Summed amounts per dimension, optionally capped to the top N
//!
//! Grouping, summing, ordering, and the top-N cap all happen in SQL; the
//! shaping here only validates columns and re-reads the rows. Ties at a cap
//! boundary break however the database ordered them.

use std::cmp::Ordering;

use bribelens_core::{Chart, ChartKind, ChartOutcome, Table, Value};
use bribelens_db::{Db, DbError, SqlParam};

pub const DEFAULT_TOP_DEPARTMENTS: i64 = 15;
pub const DEFAULT_TOP_DISTRICTS: i64 = 20;

const STATE_TOTALS_SQL: &str = "\
    SELECT state_ut, SUM(bribe_amt)::double precision AS total_amount \
    FROM bribe \
    GROUP BY state_ut \
    ORDER BY total_amount DESC";

const DEPARTMENT_TOTALS_SQL: &str = "\
    SELECT dept, SUM(bribe_amt)::double precision AS total_amount \
    FROM bribe \
    GROUP BY dept \
    ORDER BY total_amount DESC \
    LIMIT $1";

const DISTRICT_TOTALS_SQL: &str = "\
    SELECT district, SUM(bribe_amt)::double precision AS total_amount \
    FROM bribe \
    GROUP BY district \
    ORDER BY total_amount DESC \
    LIMIT $1";

/// One group with its summed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// Read `{key_column, total_amount}` pairs out of a grouped-totals result.
///
/// Returns `None` when either expected column is absent. Rows with a null
/// key or total are skipped (a null dimension value groups into such a row).
/// The descending order the statement asked for is reasserted here so the
/// shape holds for any input table.
pub fn grouped_totals(table: &Table, key_column: &str) -> Option<Vec<GroupTotal>> {
    let key_idx = table.column_index(key_column)?;
    let total_idx = table.column_index("total_amount")?;

    let mut groups: Vec<GroupTotal> = Vec::with_capacity(table.len());
    let mut skipped = 0usize;
    for row in table.rows() {
        let key = row.get(key_idx).and_then(Value::as_str);
        let total = row.get(total_idx).and_then(Value::as_f64);
        match (key, total) {
            (Some(key), Some(total)) => groups.push(GroupTotal {
                key: key.to_owned(),
                total,
            }),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, key_column, "skipped rows with null key or total");
    }

    groups.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    Some(groups)
}

fn totals_chart(
    table: &Table,
    key_column: &str,
    title: String,
    x_label: &str,
) -> Result<ChartOutcome, DbError> {
    if table.is_empty() {
        return Ok(ChartOutcome::NoData);
    }
    let Some(groups) = grouped_totals(table, key_column) else {
        return Ok(ChartOutcome::NoData);
    };
    if groups.is_empty() {
        return Ok(ChartOutcome::NoData);
    }

    let mut data = Table::new([key_column, "total_amount"]);
    for group in groups {
        data.push_row(vec![Value::Text(group.key), Value::Float(group.total)]);
    }

    Ok(ChartOutcome::Chart(Chart {
        kind: ChartKind::Bar,
        title,
        x_label: x_label.to_owned(),
        y_label: "Total Bribe Amount (INR)".to_owned(),
        data,
    }))
}

/// Total reported amount per state/UT, largest first.
pub async fn totals_by_state(db: &Db) -> Result<ChartOutcome, DbError> {
    let table = db.run_query(STATE_TOTALS_SQL, &[]).await?;
    totals_chart(
        &table,
        "state_ut",
        "Total Reported Bribe Amount by State/UT".to_owned(),
        "State/UT",
    )
}

/// The `top_n` departments by total reported amount.
///
/// The cap is applied by the statement's `LIMIT`, not after the fact.
pub async fn top_departments(db: &Db, top_n: i64) -> Result<ChartOutcome, DbError> {
    let table = db
        .run_query(DEPARTMENT_TOTALS_SQL, &[SqlParam::Int(top_n)])
        .await?;
    totals_chart(
        &table,
        "dept",
        format!("Top {top_n} Departments by Total Reported Bribe Amount"),
        "Department",
    )
}

/// The `top_n` districts by total reported amount.
pub async fn top_districts(db: &Db, top_n: i64) -> Result<ChartOutcome, DbError> {
    let table = db
        .run_query(DISTRICT_TOTALS_SQL, &[SqlParam::Int(top_n)])
        .await?;
    totals_chart(
        &table,
        "district",
        format!("Top {top_n} Districts by Total Reported Bribe Amount"),
        "District",
    )
}
