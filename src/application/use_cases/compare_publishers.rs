use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;

use crate::analysis::{build_comparison_table, LabeledSnapshot, Metric, SnapshotTable};
use crate::application::dto::{CompareReport, ScanPlan};
use crate::ports::outbound::{ProgressReporter, ScannerBackend};
use crate::scanning::domain::{ImageRef, Snapshot};
use crate::shared::error::ScanFailure;

use super::scan_images::ScanImagesUseCase;

/// ComparePublishersUseCase - the end-to-end comparison pipeline
///
/// Scans every publisher group of a [`ScanPlan`] in turn, labels the
/// resulting snapshots with their application identity, and folds the
/// labeled groups into one snapshot table per publisher plus one
/// comparison table per metric.
///
/// Publishers are processed in sorted order; within a publisher the scan
/// batch runs on the bounded pool of [`ScanImagesUseCase`].
///
/// # Type Parameters
/// * `B` - ScannerBackend implementation
/// * `PR` - ProgressReporter implementation
pub struct ComparePublishersUseCase<B, PR> {
    scanner: ScanImagesUseCase<B, PR>,
}

impl<B, PR> ComparePublishersUseCase<B, PR>
where
    B: ScannerBackend,
    PR: ProgressReporter,
{
    pub fn new(backend: B, progress: PR) -> Self {
        Self {
            scanner: ScanImagesUseCase::new(backend, progress),
        }
    }

    /// Fail-fast pipeline: the first scan failure aborts the whole run
    /// and no report is produced.
    pub async fn execute(
        &self,
        plan: &ScanPlan,
        concurrency: NonZeroUsize,
    ) -> Result<CompareReport, ScanFailure> {
        self.announce(plan);
        let mut groups = BTreeMap::new();
        for (publisher, planned) in plan.groups() {
            let progress = self.scanner.progress_reporter();
            progress.begin_batch(publisher, planned.len());

            let images: Vec<ImageRef> = planned.iter().map(|p| p.image.clone()).collect();
            let snapshots = match self.scanner.scan(&images, concurrency).await {
                Ok(snapshots) => snapshots,
                Err(failure) => {
                    progress.finish_batch("aborted");
                    return Err(failure);
                }
            };

            progress.finish_batch(&format!("{} scanned", publisher));
            groups.insert(
                publisher.clone(),
                label_snapshots(publisher, plan, snapshots),
            );
        }
        Ok(build_report(&groups))
    }

    /// Collecting pipeline: every scan failure is routed to `on_error`
    /// together with its publisher, the failed image is excluded, and
    /// the report is built from whatever succeeded.
    pub async fn execute_with_handler(
        &self,
        plan: &ScanPlan,
        concurrency: NonZeroUsize,
        mut on_error: impl FnMut(&str, ScanFailure),
    ) -> CompareReport {
        self.announce(plan);
        let mut groups = BTreeMap::new();
        for (publisher, planned) in plan.groups() {
            let progress = self.scanner.progress_reporter();
            progress.begin_batch(publisher, planned.len());

            let images: Vec<ImageRef> = planned.iter().map(|p| p.image.clone()).collect();
            let snapshots = self
                .scanner
                .scan_with_handler(&images, concurrency, |failure| {
                    progress.report_error(&format!("[{}] {}", publisher, failure));
                    on_error(publisher, failure)
                })
                .await;

            progress.finish_batch(&format!("{} scanned", publisher));
            groups.insert(
                publisher.clone(),
                label_snapshots(publisher, plan, snapshots),
            );
        }
        build_report(&groups)
    }

    fn announce(&self, plan: &ScanPlan) {
        self.scanner.progress_reporter().report(&format!(
            "Scanning {} image(s) across {} publisher(s)",
            plan.image_count(),
            plan.groups().len()
        ));
    }
}

/// Pairs each snapshot back with the application label it was planned
/// under. The scan pool may return snapshots in any order, so the
/// correlation key is the image identifier, which the manifest loader
/// guarantees unique within a publisher.
fn label_snapshots(
    publisher: &str,
    plan: &ScanPlan,
    snapshots: Vec<Snapshot>,
) -> Vec<LabeledSnapshot> {
    let applications: HashMap<String, &str> = plan.groups()[publisher]
        .iter()
        .map(|p| (p.image.identifier(), p.application.as_str()))
        .collect();

    snapshots
        .into_iter()
        .filter_map(|snapshot| {
            let application = applications.get(&snapshot.image().identifier())?;
            Some(LabeledSnapshot {
                application: application.to_string(),
                snapshot,
            })
        })
        .collect()
}

fn build_report(groups: &BTreeMap<String, Vec<LabeledSnapshot>>) -> CompareReport {
    let snapshot_tables = groups
        .iter()
        .map(|(publisher, labeled)| SnapshotTable::from_snapshots(publisher, labeled))
        .collect();

    let comparison_tables = Metric::ALL
        .iter()
        .map(|metric| build_comparison_table(groups, *metric))
        .collect();

    CompareReport {
        snapshot_tables,
        comparison_tables,
    }
}
