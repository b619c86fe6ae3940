use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scansweep::prelude::*;
use serde_json::{json, Value};

// The prelude's single-parameter Result alias shadows std's; the trait
// signatures below need the two-parameter form.
use std::result::Result;

/// Mock ScannerBackend with canned documents keyed by image identifier
pub struct MockScannerBackend {
    vulnerability_docs: HashMap<String, Value>,
    inventory_docs: HashMap<String, Value>,
    not_found: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockScannerBackend {
    pub fn new() -> Self {
        Self {
            vulnerability_docs: HashMap::new(),
            inventory_docs: HashMap::new(),
            not_found: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers an image with a well-formed pair of reports: `cves`
    /// vulnerabilities (the first `severe` of them critical) and a small
    /// inventory.
    pub fn with_image(mut self, identifier: &str, cves: usize, severe: usize) -> Self {
        assert!(severe <= cves);
        let matches: Vec<Value> = (0..cves)
            .map(|i| {
                let severity = if i < severe { "critical" } else { "low" };
                json!({
                    "vulnerability": {
                        "id": format!("CVE-2024-{:04}", i),
                        "severity": severity,
                        "fix": { "state": "fixed" }
                    },
                    "artifact": { "name": "openssl", "version": "3.0.13", "type": "deb" }
                })
            })
            .collect();
        self.vulnerability_docs
            .insert(identifier.to_string(), json!({ "matches": matches }));
        self.inventory_docs.insert(
            identifier.to_string(),
            json!({
                "artifacts": [
                    { "name": "openssl", "version": "3.0.13", "type": "deb" },
                    { "name": "zlib", "version": "1.3", "type": "deb" }
                ],
                "source": { "metadata": { "imageSize": 42_000_000 } },
                "distro": { "id": "debian" }
            }),
        );
        self
    }

    /// Registers an image whose scans fail with ImageNotFound.
    pub fn with_not_found(mut self, identifier: &str) -> Self {
        self.not_found.push(identifier.to_string());
        self
    }

    /// Registers an image whose vulnerability report violates the schema.
    pub fn with_malformed(mut self, identifier: &str) -> Self {
        self.vulnerability_docs.insert(
            identifier.to_string(),
            json!({ "matches": [{ "vulnerability": { "id": "CVE-0" } }] }),
        );
        self
    }

}

impl Default for MockScannerBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScannerBackend for MockScannerBackend {
    async fn vulnerability_report(&self, image: &ImageRef) -> Result<Value, ScanError> {
        let identifier = image.identifier();
        self.calls
            .lock()
            .unwrap()
            .push(format!("vulnerability:{}", identifier));
        if self.not_found.contains(&identifier) {
            return Err(ScanError::ImageNotFound {
                stderr: format!("1 error occurred: {} not found", identifier),
            });
        }
        self.vulnerability_docs
            .get(&identifier)
            .cloned()
            .ok_or(ScanError::MalformedOutput {
                kind: ScannerKind::Vulnerability,
                reason: "no canned document".to_string(),
            })
    }

    async fn inventory_report(&self, image: &ImageRef) -> Result<Value, ScanError> {
        let identifier = image.identifier();
        self.calls
            .lock()
            .unwrap()
            .push(format!("inventory:{}", identifier));
        if self.not_found.contains(&identifier) {
            return Err(ScanError::ImageNotFound {
                stderr: format!("1 error occurred: {} not found", identifier),
            });
        }
        self.inventory_docs
            .get(&identifier)
            .cloned()
            .ok_or(ScanError::MalformedOutput {
                kind: ScannerKind::Inventory,
                reason: "no canned document".to_string(),
            })
    }
}
