use crate::analysis::{ComparisonTable, SnapshotTable};

/// The aggregated outcome of a publisher comparison run: one snapshot
/// table per publisher and one comparison table per metric.
#[derive(Debug, Clone)]
pub struct CompareReport {
    pub snapshot_tables: Vec<SnapshotTable>,
    pub comparison_tables: Vec<ComparisonTable>,
}
