use std::collections::BTreeMap;

use crate::scanning::domain::ImageRef;

/// An image to scan together with its caller-owned application label.
///
/// The application identity is the join key used when comparing
/// publishers; it travels alongside the image reference and is never
/// merged into it.
#[derive(Debug, Clone)]
pub struct PlannedImage {
    pub application: String,
    pub image: ImageRef,
}

/// The full scan manifest: publisher label mapped to the images that
/// publisher provides.
///
/// Publisher groups stay in sorted order so downstream tables are
/// deterministic. `(publisher, image identifier)` pairs are unique; the
/// manifest loader rejects duplicates so snapshot-to-application
/// correlation stays unambiguous.
#[derive(Debug, Clone, Default)]
pub struct ScanPlan {
    groups: BTreeMap<String, Vec<PlannedImage>>,
}

impl ScanPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, publisher: &str, planned: PlannedImage) {
        self.groups
            .entry(publisher.to_string())
            .or_default()
            .push(planned);
    }

    pub fn contains(&self, publisher: &str, identifier: &str) -> bool {
        self.groups
            .get(publisher)
            .is_some_and(|images| images.iter().any(|p| p.image.identifier() == identifier))
    }

    pub fn groups(&self) -> &BTreeMap<String, Vec<PlannedImage>> {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of images across all publishers.
    pub fn image_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
