use std::fmt;
use thiserror::Error;

use crate::scanning::domain::ImageRef;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every image was scanned and all tables were written
    Success = 0,
    /// One or more per-image scan failures (the batch still produced output)
    ScanFailures = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (manifest error, config error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ScanFailures => write!(f, "Scan Failures (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Which of the two external scanners an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerKind {
    Vulnerability,
    Inventory,
}

impl fmt::Display for ScannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScannerKind::Vulnerability => write!(f, "vulnerability"),
            ScannerKind::Inventory => write!(f, "inventory"),
        }
    }
}

/// Errors from parsing an image reference string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageRefError {
    #[error("image reference is missing a registry: {input:?}")]
    MissingRegistry { input: String },

    #[error("image reference is missing a repository: {input:?}")]
    MissingRepository { input: String },

    #[error("image reference has an empty tag: {input:?}")]
    EmptyTag { input: String },

    #[error("image reference has an empty digest: {input:?}")]
    EmptyDigest { input: String },
}

/// Errors from normalizing a raw scanner report.
///
/// Always fatal to the single report that produced them; values outside
/// the recognized enumerations are never coerced to a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("report is missing required field: {path}")]
    MissingField { path: String },

    #[error("unrecognized severity: {value:?}")]
    UnknownSeverity { value: String },

    #[error("malformed report structure: {message}")]
    InvalidStructure { message: String },
}

/// Errors from scanning a single image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The external tool signalled that the image could not be resolved or
    /// pulled. This is the expected, recoverable kind: batch callers treat
    /// it as "skip and record".
    #[error("image not found: {stderr}")]
    ImageNotFound { stderr: String },

    /// The tool produced output that is not valid JSON, failed the
    /// normalizer's schema contract, exited abnormally, or timed out.
    #[error("{kind} scanner produced malformed output: {reason}")]
    MalformedOutput { kind: ScannerKind, reason: String },
}

/// A scan error joined to the image it occurred on.
///
/// This is the unit routed to batch error handlers and returned in
/// fail-fast mode, so per-image failures stay individually attributable.
#[derive(Debug, Clone, Error)]
#[error("scan of {image} failed: {error}")]
pub struct ScanFailure {
    pub image: ImageRef,
    #[source]
    pub error: ScanError,
}

impl ScanFailure {
    pub fn new(image: ImageRef, error: ScanError) -> Self {
        Self { image, error }
    }
}
