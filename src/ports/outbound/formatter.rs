use crate::analysis::{ComparisonTable, SnapshotTable};
use crate::shared::Result;

/// TableFormatter port for rendering aggregated tables
///
/// Formatters are pure consumers of the analysis layer's tables; they
/// produce a string and leave persistence to an `OutputPresenter`.
pub trait TableFormatter {
    /// Renders a per-publisher snapshot table
    fn format_snapshot_table(&self, table: &SnapshotTable) -> Result<String>;

    /// Renders a cross-publisher comparison table
    fn format_comparison_table(&self, table: &ComparisonTable) -> Result<String>;
}
