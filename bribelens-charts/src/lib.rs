//! Chart-ready aggregations over the bribe report fact table
//!
//! Five builders, each issuing exactly one fixed query through
//! [`bribelens_db::Db`] and shaping the result into a
//! [`bribelens_core::ChartOutcome`]:
//!
//! - [`amount_distribution`] - histogram of amounts over fixed rupee ranges
//! - [`totals_by_state`] - summed amounts per state/UT
//! - [`top_departments`] / [`top_districts`] - top-N summed amounts
//! - [`reports_over_time`] - monthly report counts
//!
//! An external presentation layer picks one of the five by its
//! [`ChartSelection`] label and renders whatever comes back; nothing here
//! draws anything.

pub mod distribution;
pub mod timeline;
pub mod totals;

use std::str::FromStr;

use bribelens_core::ChartOutcome;
use bribelens_db::{Db, DbError};

pub use distribution::amount_distribution;
pub use timeline::reports_over_time;
pub use totals::{
    top_departments, top_districts, totals_by_state, DEFAULT_TOP_DEPARTMENTS,
    DEFAULT_TOP_DISTRICTS,
};

/// The five selectable charts, keyed by the labels the dashboard dropdown
/// has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSelection {
    AmountDistribution,
    TotalsByState,
    TopDepartments,
    TopDistricts,
    ReportsOverTime,
}

impl ChartSelection {
    pub const ALL: [ChartSelection; 5] = [
        ChartSelection::AmountDistribution,
        ChartSelection::TotalsByState,
        ChartSelection::TopDepartments,
        ChartSelection::TopDistricts,
        ChartSelection::ReportsOverTime,
    ];

    /// The fixed inbound label for this chart.
    pub fn label(&self) -> &'static str {
        match self {
            ChartSelection::AmountDistribution => "Bribe distribution",
            ChartSelection::TotalsByState => "State wise Bribe data",
            ChartSelection::TopDepartments => "Top 15 Departments",
            ChartSelection::TopDistricts => "Top 20 Districts",
            ChartSelection::ReportsOverTime => "Bribes over time",
        }
    }

    /// Run the selected aggregation with its default parameters.
    pub async fn render(&self, db: &Db) -> Result<ChartOutcome, DbError> {
        match self {
            ChartSelection::AmountDistribution => amount_distribution(db).await,
            ChartSelection::TotalsByState => totals_by_state(db).await,
            ChartSelection::TopDepartments => {
                top_departments(db, DEFAULT_TOP_DEPARTMENTS).await
            }
            ChartSelection::TopDistricts => top_districts(db, DEFAULT_TOP_DISTRICTS).await,
            ChartSelection::ReportsOverTime => reports_over_time(db).await,
        }
    }
}

/// A selection string that matches none of the five labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chart selection '{0}'")]
pub struct UnknownSelection(String);

impl FromStr for ChartSelection {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|selection| selection.label() == s)
            .ok_or_else(|| UnknownSelection(s.to_owned()))
    }
}
