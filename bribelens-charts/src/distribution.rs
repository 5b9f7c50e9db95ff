//! Amount distribution over fixed rupee ranges

use bribelens_core::{Chart, ChartKind, ChartOutcome, Table, Value};
use bribelens_db::{Db, DbError};

const AMOUNTS_SQL: &str = "SELECT bribe_amt::double precision AS bribe_amt FROM bribe";

/// Upper edges of the closed buckets; everything past the last edge falls
/// into the open-ended bucket.
const BUCKET_EDGES: [f64; 11] = [
    500.0, 1000.0, 1500.0, 2000.0, 3000.0, 5000.0, 10000.0, 20000.0, 30000.0, 40000.0, 50000.0,
];

/// Human-readable range labels, one per bucket, in boundary order.
pub const BUCKET_LABELS: [&str; 12] = [
    "₹1-500",
    "₹501-1000",
    "₹1001-1500",
    "₹1501-2000",
    "₹2001-3000",
    "₹3001-5000",
    "₹5001-10000",
    "₹10001-20000",
    "₹20001-30000",
    "₹30001-40000",
    "₹40001-50000",
    ">₹50000",
];

/// One bucket of the distribution, zero counts representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCount {
    pub label: &'static str,
    pub count: u64,
}

/// Bucket index for an amount.
///
/// Edges are right-inclusive: exactly 500 belongs to `₹1-500`, 501 to
/// `₹501-1000`. Amounts below zero or above the top edge land in the
/// open-ended `>₹50000` bucket; zero itself lands in the first bucket, so
/// every non-negative amount maps to exactly one bucket.
pub fn bucket_index(amount: f64) -> usize {
    if amount < 0.0 {
        return BUCKET_LABELS.len() - 1;
    }
    BUCKET_EDGES
        .iter()
        .position(|edge| amount <= *edge)
        .unwrap_or(BUCKET_LABELS.len() - 1)
}

/// Count amounts per bucket, in boundary order regardless of input order.
///
/// Returns `None` when the `bribe_amt` column is missing or holds no numeric
/// values. Zero-count buckets are kept here; the chart drops them.
pub fn bin_amounts(table: &Table) -> Option<Vec<BucketCount>> {
    let values = table.column_values("bribe_amt")?;
    let mut counts = [0u64; BUCKET_LABELS.len()];
    let mut binned = 0usize;
    for value in values {
        if let Some(amount) = value.as_f64() {
            counts[bucket_index(amount)] += 1;
            binned += 1;
        }
    }
    if binned == 0 {
        return None;
    }
    Some(
        BUCKET_LABELS
            .iter()
            .copied()
            .zip(counts)
            .map(|(label, count)| BucketCount { label, count })
            .collect(),
    )
}

/// Histogram of reported amounts over the fixed ranges.
///
/// Zero-count buckets are dropped from the emitted chart; the remaining
/// buckets keep boundary order.
pub async fn amount_distribution(db: &Db) -> Result<ChartOutcome, DbError> {
    let table = db.run_query(AMOUNTS_SQL, &[]).await?;
    if table.is_empty() {
        return Ok(ChartOutcome::NoData);
    }
    let Some(buckets) = bin_amounts(&table) else {
        return Ok(ChartOutcome::NoData);
    };

    let mut data = Table::new(["Bribe Amount Range", "Number of Reports"]);
    for bucket in buckets.iter().filter(|bucket| bucket.count > 0) {
        data.push_row(vec![
            Value::Text(bucket.label.to_owned()),
            Value::Int(bucket.count as i64),
        ]);
    }

    Ok(ChartOutcome::Chart(Chart {
        kind: ChartKind::Histogram,
        title: "Distribution of Reported Bribe Amounts by Range".to_owned(),
        x_label: "Bribe Amount (INR) Range".to_owned(),
        y_label: "Number of Reports".to_owned(),
        data,
    }))
}
