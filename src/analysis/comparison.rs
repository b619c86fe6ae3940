use std::collections::{BTreeMap, BTreeSet};

use super::counts::count_by;
use super::table::LabeledSnapshot;

/// The four comparison measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalCves,
    SevereCves,
    Components,
    ImageSizeMb,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::TotalCves,
        Metric::SevereCves,
        Metric::Components,
        Metric::ImageSizeMb,
    ];

    /// File-name-friendly identifier, used for persisted table names.
    pub fn slug(self) -> &'static str {
        match self {
            Metric::TotalCves => "total-cves",
            Metric::SevereCves => "severe-cves",
            Metric::Components => "components",
            Metric::ImageSizeMb => "image-size-mb",
        }
    }

    /// Human-readable title, used as the heading of rendered tables.
    pub fn title(self) -> &'static str {
        match self {
            Metric::TotalCves => "Total CVEs",
            Metric::SevereCves => "Severe CVEs",
            Metric::Components => "Number of Components",
            Metric::ImageSizeMb => "Image Size (MB)",
        }
    }

    /// Renders one cell value: counts as integers, sizes with one decimal.
    pub fn render_cell(self, value: f64) -> String {
        match self {
            Metric::ImageSizeMb => format!("{:.1}", value),
            _ => format!("{}", value as u64),
        }
    }
}

/// One row of a comparison table: an application and one cell per
/// publisher, in the table's publisher order.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub application: String,
    pub cells: Vec<f64>,
}

/// A cross-publisher comparison for a single metric: one row per
/// application, one column per publisher.
#[derive(Debug, Clone)]
pub struct ComparisonTable {
    metric: Metric,
    publishers: Vec<String>,
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn publishers(&self) -> &[String] {
        &self.publishers
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Looks up a single cell by application and publisher.
    pub fn cell(&self, application: &str, publisher: &str) -> Option<f64> {
        let column = self.publishers.iter().position(|p| p == publisher)?;
        self.rows
            .iter()
            .find(|row| row.application == application)
            .map(|row| row.cells[column])
    }
}

/// Builds a comparison table for `metric` over labeled snapshot groups.
///
/// Each publisher's snapshots are first reduced to one value per
/// application (counting folds for the three count metrics, summed
/// megabytes for image size), then the groups are joined as a full outer
/// join on application identity. An application missing from a publisher
/// gets a zero cell, never a dropped row: the comparison runs over the
/// union of application keys, not the intersection. Row and column order
/// is deterministic (sorted applications, sorted publishers).
pub fn build_comparison_table(
    groups: &BTreeMap<String, Vec<LabeledSnapshot>>,
    metric: Metric,
) -> ComparisonTable {
    let mut reduced: BTreeMap<&str, BTreeMap<String, f64>> = BTreeMap::new();
    let mut applications: BTreeSet<String> = BTreeSet::new();

    for (publisher, snapshots) in groups {
        let per_application = reduce_group(snapshots, metric);
        applications.extend(per_application.keys().cloned());
        reduced.insert(publisher, per_application);
    }

    let publishers: Vec<String> = groups.keys().cloned().collect();
    let rows = applications
        .into_iter()
        .map(|application| {
            let cells = publishers
                .iter()
                .map(|publisher| {
                    reduced[publisher.as_str()]
                        .get(&application)
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect();
            ComparisonRow { application, cells }
        })
        .collect();

    ComparisonTable {
        metric,
        publishers,
        rows,
    }
}

/// Reduces one publisher's snapshots to a per-application value. Multiple
/// images under the same application sum.
fn reduce_group(snapshots: &[LabeledSnapshot], metric: Metric) -> BTreeMap<String, f64> {
    let reference = snapshots.iter().map(|labeled| labeled.application.clone());
    match metric {
        Metric::TotalCves => as_f64(count_by(
            &flatten_cves(snapshots),
            reference,
            |(application, _)| application.clone(),
            |_| true,
        )),
        Metric::SevereCves => as_f64(count_by(
            &flatten_cves(snapshots),
            reference,
            |(application, _)| application.clone(),
            |(_, vulnerability)| vulnerability.severity().is_severe(),
        )),
        Metric::Components => as_f64(count_by(
            &flatten_components(snapshots),
            reference,
            |(application, _)| application.clone(),
            |_| true,
        )),
        Metric::ImageSizeMb => {
            let mut sizes: BTreeMap<String, f64> =
                reference.map(|application| (application, 0.0)).collect();
            for labeled in snapshots {
                *sizes.entry(labeled.application.clone()).or_insert(0.0) +=
                    labeled.snapshot.image_size_mb();
            }
            sizes
        }
    }
}

fn flatten_cves(
    snapshots: &[LabeledSnapshot],
) -> Vec<(String, &crate::scanning::domain::Vulnerability)> {
    snapshots
        .iter()
        .flat_map(|labeled| {
            labeled
                .snapshot
                .vulnerabilities()
                .iter()
                .map(|vulnerability| (labeled.application.clone(), vulnerability))
        })
        .collect()
}

fn flatten_components(
    snapshots: &[LabeledSnapshot],
) -> Vec<(String, &crate::scanning::domain::Component)> {
    snapshots
        .iter()
        .flat_map(|labeled| {
            labeled
                .snapshot
                .components()
                .iter()
                .map(|component| (labeled.application.clone(), component))
        })
        .collect()
}

fn as_f64(counts: BTreeMap<String, usize>) -> BTreeMap<String, f64> {
    counts
        .into_iter()
        .map(|(key, count)| (key, count as f64))
        .collect()
}
