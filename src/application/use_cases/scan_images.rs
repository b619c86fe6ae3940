use std::num::NonZeroUsize;

use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::ports::outbound::{ProgressReporter, ScannerBackend};
use crate::scanning::domain::{ImageRef, Snapshot};
use crate::scanning::normalize::{parse_inventory_report, parse_vulnerability_report};
use crate::shared::error::{ScanError, ScanFailure, ScannerKind};

/// ScanImagesUseCase - the scan orchestrator
///
/// Runs single images through both scanner backends ([`Self::scan_image`])
/// and fans whole batches out over a bounded worker pool. The two batch
/// modes differ only in failure policy:
///
/// * [`Self::scan`] is fail-fast: the first failure is returned with its
///   image identity, completed snapshots are discarded, pending work is
///   not started and in-flight scans are cancelled best-effort.
/// * [`Self::scan_with_handler`] collects: every failure is routed to the
///   handler, the failed image is excluded from the results, and every
///   image is attempted exactly once.
///
/// Result order is unspecified relative to input order when `concurrency`
/// is greater than one; callers that need pairing correlate via
/// `Snapshot::image`. With `concurrency == 1` both modes run a strictly
/// sequential loop with no pool machinery and deterministic order.
///
/// # Type Parameters
/// * `B` - ScannerBackend implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanImagesUseCase<B, PR> {
    backend: B,
    progress: PR,
}

impl<B, PR> ScanImagesUseCase<B, PR>
where
    B: ScannerBackend,
    PR: ProgressReporter,
{
    pub fn new(backend: B, progress: PR) -> Self {
        Self { backend, progress }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress
    }

    /// Scans a single image through both backends into a snapshot.
    ///
    /// The timestamp is captured once, before either sub-scan, and means
    /// "scan initiated at". The vulnerability scan runs before the
    /// inventory scan; both must succeed. Normalizer failures surface as
    /// `ScanError::MalformedOutput` carrying the scanner kind.
    pub async fn scan_image(&self, image: &ImageRef) -> Result<Snapshot, ScanError> {
        let scanned_at = Utc::now();

        let vulnerability_doc = self.backend.vulnerability_report(image).await?;
        let vulnerabilities =
            parse_vulnerability_report(&vulnerability_doc).map_err(|e| {
                ScanError::MalformedOutput {
                    kind: ScannerKind::Vulnerability,
                    reason: e.to_string(),
                }
            })?;

        let inventory_doc = self.backend.inventory_report(image).await?;
        let inventory = parse_inventory_report(&inventory_doc).map_err(|e| {
            ScanError::MalformedOutput {
                kind: ScannerKind::Inventory,
                reason: e.to_string(),
            }
        })?;

        Ok(Snapshot::new(
            image.clone(),
            scanned_at,
            vulnerabilities,
            inventory.components,
            inventory.image_size_bytes,
            inventory.distro,
        ))
    }

    /// Fail-fast batch scan.
    ///
    /// Returns the snapshots of every image, or the first failure. On
    /// failure no partial result is returned: completed snapshots are
    /// dropped and outstanding work is cancelled by dropping the pool
    /// (the subprocess backend kills its children on drop).
    pub async fn scan(
        &self,
        images: &[ImageRef],
        concurrency: NonZeroUsize,
    ) -> Result<Vec<Snapshot>, ScanFailure> {
        let total = images.len();

        if concurrency.get() == 1 {
            let mut snapshots = Vec::with_capacity(total);
            for (idx, image) in images.iter().enumerate() {
                match self.scan_image(image).await {
                    Ok(snapshot) => snapshots.push(snapshot),
                    Err(error) => return Err(ScanFailure::new(image.clone(), error)),
                }
                self.progress.batch_progress(idx + 1, total);
            }
            return Ok(snapshots);
        }

        let mut pool = stream::iter(images)
            .map(|image| async move { (image, self.scan_image(image).await) })
            .buffer_unordered(concurrency.get());

        let mut snapshots = Vec::with_capacity(total);
        let mut completed = 0;
        while let Some((image, result)) = pool.next().await {
            match result {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(error) => return Err(ScanFailure::new(image.clone(), error)),
            }
            completed += 1;
            self.progress.batch_progress(completed, total);
        }
        Ok(snapshots)
    }

    /// Collecting batch scan.
    ///
    /// Every failure is routed to `on_error` and its image excluded from
    /// the result list; the batch continues and every image is attempted
    /// exactly once. There is no cancellation in this mode.
    pub async fn scan_with_handler(
        &self,
        images: &[ImageRef],
        concurrency: NonZeroUsize,
        mut on_error: impl FnMut(ScanFailure),
    ) -> Vec<Snapshot> {
        let total = images.len();

        if concurrency.get() == 1 {
            let mut snapshots = Vec::with_capacity(total);
            for (idx, image) in images.iter().enumerate() {
                match self.scan_image(image).await {
                    Ok(snapshot) => snapshots.push(snapshot),
                    Err(error) => on_error(ScanFailure::new(image.clone(), error)),
                }
                self.progress.batch_progress(idx + 1, total);
            }
            return snapshots;
        }

        let mut pool = stream::iter(images)
            .map(|image| async move { (image, self.scan_image(image).await) })
            .buffer_unordered(concurrency.get());

        let mut snapshots = Vec::with_capacity(total);
        let mut completed = 0;
        while let Some((image, result)) = pool.next().await {
            match result {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(error) => on_error(ScanFailure::new(image.clone(), error)),
            }
            completed += 1;
            self.progress.batch_progress(completed, total);
        }
        snapshots
    }
}
