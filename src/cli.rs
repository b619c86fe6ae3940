use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

/// Scan container images with grype and syft and compare publishers
#[derive(Parser, Debug)]
#[command(name = "scansweep")]
#[command(version)]
#[command(
    about = "Scan container images with grype and syft and compare publishers",
    long_about = None
)]
pub struct Args {
    /// Path to the scan manifest CSV
    /// (columns: application,publisher,registry,repository,tag,digest)
    pub manifest: PathBuf,

    /// Directory to write snapshot and comparison tables into
    #[arg(long, default_value = "scansweep-out", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Number of images to scan concurrently
    #[arg(short, long, default_value = "4", value_name = "N")]
    pub concurrency: NonZeroUsize,

    /// Abort the whole run on the first scan failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Per-scanner-invocation timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Directory holding the scanner config files
    /// (defaults to ~/.scansweep, created on first run)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Suppress the comparison tables on stdout
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
