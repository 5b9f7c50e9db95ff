//! Monthly trend of report counts

use std::collections::BTreeMap;

use bribelens_core::{Chart, ChartKind, ChartOutcome, Table, Value};
use bribelens_db::{Db, DbError};
use chrono::{DateTime, NaiveDate};

const DATES_SQL: &str = "SELECT doi FROM bribe WHERE doi IS NOT NULL";

/// One calendar month with its report count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCount {
    /// Zero-padded `YYYY-MM`; lexicographic order is chronological order.
    pub month: String,
    pub count: u64,
}

/// Coerce a cell to a calendar date.
///
/// Date and timestamp values pass through; text is tried as `YYYY-MM-DD`,
/// then as an RFC 3339 timestamp. Anything else is unusable.
fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(_) | Value::Timestamp(_) => value.as_date(),
        Value::Text(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        }
        _ => None,
    }
}

/// Count reports per calendar month, ascending by month label.
///
/// Rows whose `doi` cannot be coerced to a date are dropped silently - lenient
/// by design, since upstream data quality is out of this system's hands.
/// Returns `None` when the column is missing or nothing survives coercion.
pub fn monthly_counts(table: &Table) -> Option<Vec<MonthCount>> {
    let values = table.column_values("doi")?;
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut dropped = 0usize;
    for value in values {
        match coerce_date(value) {
            Some(date) => *counts.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1,
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(dropped, "dropped rows with unusable dates");
    }
    if counts.is_empty() {
        return None;
    }
    Some(
        counts
            .into_iter()
            .map(|(month, count)| MonthCount { month, count })
            .collect(),
    )
}

/// Line chart of report counts per month.
pub async fn reports_over_time(db: &Db) -> Result<ChartOutcome, DbError> {
    let table = db.run_query(DATES_SQL, &[]).await?;
    if table.is_empty() {
        return Ok(ChartOutcome::NoData);
    }
    let Some(months) = monthly_counts(&table) else {
        return Ok(ChartOutcome::NoData);
    };

    let mut data = Table::new(["month_year", "count"]);
    for month in months {
        data.push_row(vec![
            Value::Text(month.month),
            Value::Int(month.count as i64),
        ]);
    }

    Ok(ChartOutcome::Chart(Chart {
        kind: ChartKind::Line,
        title: "Number of Bribe Reports Over Time (Monthly)".to_owned(),
        x_label: "Month".to_owned(),
        y_label: "Number of Reports".to_owned(),
        data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dates_table(values: Vec<Value>) -> Table {
        let mut table = Table::new(["doi"]);
        for value in values {
            table.push_row(vec![value]);
        }
        table
    }

    fn text_dates(dates: &[&str]) -> Table {
        dates_table(dates.iter().map(|d| Value::Text((*d).to_owned())).collect())
    }

    #[test]
    fn unparseable_rows_are_dropped_silently() {
        let table = text_dates(&["2023-01-15", "bad-date", "2023-01-20", "2023-02-01"]);
        let months = monthly_counts(&table).unwrap();
        let pairs: Vec<(&str, u64)> = months.iter().map(|m| (m.month.as_str(), m.count)).collect();
        assert_eq!(pairs, vec![("2023-01", 2), ("2023-02", 1)]);
    }

    #[test]
    fn months_ascend_regardless_of_input_order() {
        let table = text_dates(&["2024-03-01", "2021-12-31", "2023-06-15", "2021-12-01"]);
        let months = monthly_counts(&table).unwrap();
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["2021-12", "2023-06", "2024-03"]);
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn one_entry_per_calendar_month() {
        let table = text_dates(&["2023-01-01", "2023-01-31", "2023-01-15"]);
        let months = monthly_counts(&table).unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].count, 3);
    }

    #[test]
    fn native_dates_and_timestamps_pass_through() {
        let date = NaiveDate::from_ymd_opt(2022, 7, 4).unwrap();
        let ts = DateTime::parse_from_rfc3339("2022-08-09T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let table = dates_table(vec![Value::Date(date), Value::Timestamp(ts)]);
        let months = monthly_counts(&table).unwrap();
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["2022-07", "2022-08"]);
    }

    #[test]
    fn nothing_usable_yields_none() {
        assert!(monthly_counts(&Table::new(["other"])).is_none());
        let table = text_dates(&["not-a-date", "also bad"]);
        assert!(monthly_counts(&table).is_none());
    }

    #[test]
    fn zero_padding_keeps_lexicographic_chronological() {
        let table = text_dates(&["2023-09-10", "2023-10-02", "2023-11-20"]);
        let months = monthly_counts(&table).unwrap();
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["2023-09", "2023-10", "2023-11"]);
    }
}
