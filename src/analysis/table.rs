use crate::scanning::domain::Snapshot;

/// A snapshot joined to its caller-owned application label.
///
/// The application identity is an external label supplied alongside each
/// image in the scan plan; it is the join key across publishers and never
/// lives inside the image reference itself.
#[derive(Debug, Clone)]
pub struct LabeledSnapshot {
    pub application: String,
    pub snapshot: Snapshot,
}

/// Column headers for a persisted snapshot table, in order.
pub const SNAPSHOT_TABLE_COLUMNS: [&str; 10] = [
    "application",
    "registry",
    "repository",
    "tag",
    "digest",
    "distro",
    "total_cves",
    "severe_cves",
    "components",
    "image_size_mb",
];

/// One row of a snapshot table: a scanned image reduced to its identity
/// columns and the four metrics.
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    pub application: String,
    pub registry: String,
    pub repository: String,
    pub tag: String,
    /// Empty string when the image was referenced without a digest.
    pub digest: String,
    pub distro: String,
    pub total_cves: usize,
    pub severe_cves: usize,
    pub components: usize,
    pub image_size_mb: f64,
}

impl SnapshotRow {
    fn from_labeled(labeled: &LabeledSnapshot) -> Self {
        let snapshot = &labeled.snapshot;
        let image = snapshot.image();
        Self {
            application: labeled.application.clone(),
            registry: image.registry().to_string(),
            repository: image.repository().to_string(),
            tag: image.tag().to_string(),
            digest: image.digest().unwrap_or_default().to_string(),
            distro: snapshot.distro().to_string(),
            total_cves: snapshot.total_cves(),
            severe_cves: snapshot.severe_cves(),
            components: snapshot.component_count(),
            image_size_mb: snapshot.image_size_mb(),
        }
    }
}

/// One publisher's scanned images as a flat table, one row per image,
/// sorted by application.
#[derive(Debug, Clone)]
pub struct SnapshotTable {
    publisher: String,
    rows: Vec<SnapshotRow>,
}

impl SnapshotTable {
    pub fn from_snapshots(publisher: impl Into<String>, snapshots: &[LabeledSnapshot]) -> Self {
        let mut rows: Vec<SnapshotRow> = snapshots.iter().map(SnapshotRow::from_labeled).collect();
        rows.sort_by(|a, b| a.application.cmp(&b.application));
        Self {
            publisher: publisher.into(),
            rows,
        }
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn rows(&self) -> &[SnapshotRow] {
        &self.rows
    }
}
