//! Chart-ready results
//!
//! An aggregation either yields a fully populated [`Chart`] or the explicit
//! [`ChartOutcome::NoData`] marker. A chart with zero-valued rows and "no data
//! at all" are different answers and the rendering layer is expected to treat
//! them differently.

use serde::Serialize;

use crate::table::Table;

/// How the rendering layer should draw the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Bar,
    Line,
}

/// Tabular data plus the metadata a renderer needs.
///
/// Constructed only by the chart builders, after they have validated the
/// upstream result - there is no partially-filled state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: Table,
}

/// Outcome of a chart builder: a populated chart, or nothing usable upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ChartOutcome {
    Chart(Chart),
    NoData,
}

impl ChartOutcome {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartOutcome::NoData)
    }

    pub fn chart(&self) -> Option<&Chart> {
        match self {
            ChartOutcome::Chart(chart) => Some(chart),
            ChartOutcome::NoData => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    #[test]
    fn no_data_is_distinguishable_from_empty_chart() {
        let chart = ChartOutcome::Chart(Chart {
            kind: ChartKind::Bar,
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            data: Table::new(["k", "v"]),
        });
        assert!(!chart.is_no_data());
        assert!(chart.chart().is_some());
        assert!(ChartOutcome::NoData.is_no_data());
        assert!(ChartOutcome::NoData.chart().is_none());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(ChartOutcome::NoData).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "no-data" }));

        let mut data = Table::new(["month_year", "count"]);
        data.push_row(vec![Value::Text("2023-01".into()), Value::Int(2)]);
        let outcome = ChartOutcome::Chart(Chart {
            kind: ChartKind::Line,
            title: "Reports".into(),
            x_label: "Month".into(),
            y_label: "Count".into(),
            data,
        });
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["status"], "chart");
        assert_eq!(json["kind"], "line");
        assert_eq!(json["data"]["rows"][0][1], 2);
    }
}
