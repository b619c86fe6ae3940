//! scansweep - container image scanning and publisher comparison
//!
//! This library orchestrates grype (vulnerabilities) and syft (inventory)
//! over batches of container images, normalizes their JSON reports into
//! snapshots, and folds the snapshots into cross-publisher comparison
//! tables, following hexagonal architecture principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scanning`): Image identity, snapshots, and report normalization
//! - **Analysis Layer** (`analysis`): Counting folds and comparison tables
//! - **Application Layer** (`application`): Use cases and application DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use scansweep::prelude::*;
//! use std::num::NonZeroUsize;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let backend = ProcessScannerBackend::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ScanImagesUseCase::new(backend, progress_reporter);
//!
//! // Scan a batch of images
//! let images = vec![ImageRef::parse("docker.io/library/nginx:latest")?];
//! let concurrency = NonZeroUsize::new(4).unwrap();
//! let snapshots = use_case.scan(&images, concurrency).await?;
//! println!("{} CVEs", snapshots[0].total_cves());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod analysis;
pub mod application;
pub mod config;
pub mod ports;
pub mod scanning;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{CsvFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::process::ProcessScannerBackend;
    pub use crate::analysis::{
        build_comparison_table, ComparisonTable, LabeledSnapshot, Metric, SnapshotTable,
    };
    pub use crate::application::dto::{CompareReport, PlannedImage, ScanPlan};
    pub use crate::application::use_cases::{ComparePublishersUseCase, ScanImagesUseCase};
    pub use crate::ports::outbound::{
        OutputPresenter, ProgressReporter, ScannerBackend, TableFormatter,
    };
    pub use crate::scanning::domain::{
        Component, ImageRef, Severity, Snapshot, Vulnerability,
    };
    pub use crate::shared::error::{
        ExitCode, ImageRefError, ScanError, ScanFailure, ScannerKind, SchemaError,
    };
    pub use crate::shared::Result;
}
