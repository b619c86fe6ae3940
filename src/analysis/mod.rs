//! Aggregation layer: pure folds from snapshots to analysis-ready tables.
//!
//! Everything here runs after scanning has completed; there is no I/O and
//! no shared mutable state.

pub mod comparison;
pub mod counts;
pub mod table;

pub use comparison::{build_comparison_table, ComparisonRow, ComparisonTable, Metric};
pub use counts::count_by;
pub use table::{LabeledSnapshot, SnapshotRow, SnapshotTable, SNAPSHOT_TABLE_COLUMNS};
