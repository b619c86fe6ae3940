use async_trait::async_trait;
use serde_json::Value;

use crate::scanning::domain::ImageRef;
use crate::shared::error::ScanError;

/// ScannerBackend port wrapping the two external scanner invocations.
///
/// Implementations return the raw JSON document each tool emits for an
/// image; normalization into typed reports happens in the scanning layer,
/// not behind this port. Invoking a backend is the only point in the
/// pipeline where a call blocks.
#[async_trait]
pub trait ScannerBackend: Send + Sync {
    /// Runs the vulnerability scanner against `image` and returns its raw
    /// JSON report.
    async fn vulnerability_report(&self, image: &ImageRef) -> Result<Value, ScanError>;

    /// Runs the inventory scanner against `image` and returns its raw
    /// JSON report.
    async fn inventory_report(&self, image: &ImageRef) -> Result<Value, ScanError>;
}
