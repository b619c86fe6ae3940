use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::component::Component;
use super::image::ImageRef;
use super::vulnerability::{Severity, Vulnerability};

/// The normalized result of scanning one image at one point in time.
///
/// Merges the vulnerability report and the inventory report into a single
/// immutable record. `scanned_at` is captured once, before either sub-scan
/// runs, and means "scan initiated at". A snapshot owns its vulnerability
/// and component lists exclusively; nothing is shared across snapshots.
#[derive(Debug, Clone)]
pub struct Snapshot {
    image: ImageRef,
    scanned_at: DateTime<Utc>,
    vulnerabilities: Vec<Vulnerability>,
    components: Vec<Component>,
    image_size_bytes: u64,
    distro: String,
}

impl Snapshot {
    pub fn new(
        image: ImageRef,
        scanned_at: DateTime<Utc>,
        vulnerabilities: Vec<Vulnerability>,
        components: Vec<Component>,
        image_size_bytes: u64,
        distro: String,
    ) -> Self {
        Self {
            image,
            scanned_at,
            vulnerabilities,
            components,
            image_size_bytes,
            distro,
        }
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn scanned_at(&self) -> DateTime<Utc> {
        self.scanned_at
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn image_size_bytes(&self) -> u64 {
        self.image_size_bytes
    }

    /// The OS distribution id reported by the inventory scanner, or
    /// `"unknown"` when the report did not carry one.
    pub fn distro(&self) -> &str {
        &self.distro
    }

    pub fn total_cves(&self) -> usize {
        self.vulnerabilities.len()
    }

    /// Count of vulnerabilities with severity critical or high.
    pub fn severe_cves(&self) -> usize {
        self.vulnerabilities
            .iter()
            .filter(|v| v.severity().is_severe())
            .count()
    }

    /// Vulnerability counts bucketed by severity. Every one of the six
    /// levels appears, zero-valued when nothing was reported at it.
    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        for vulnerability in &self.vulnerabilities {
            *counts.entry(vulnerability.severity()).or_insert(0) += 1;
        }
        counts
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Image size in megabytes (bytes / 1,000,000).
    pub fn image_size_mb(&self) -> f64 {
        self.image_size_bytes as f64 / 1_000_000.0
    }
}
