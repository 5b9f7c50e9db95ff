pub mod chart;
pub mod table;

pub use chart::{Chart, ChartKind, ChartOutcome};
pub use table::{Row, Table, Value};
