mod adapters;
mod analysis;
mod application;
mod cli;
mod config;
mod ports;
mod scanning;
mod shared;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{anyhow, Context};
use owo_colors::OwoColorize;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use adapters::outbound::formatters::{CsvFormatter, MarkdownFormatter};
use adapters::outbound::process::ProcessScannerBackend;
use application::dto::CompareReport;
use application::use_cases::ComparePublishersUseCase;
use cli::Args;
use config::{ensure_scanner_config, load_scan_plan};
use ports::outbound::{OutputPresenter, TableFormatter};
use shared::error::ExitCode;
use shared::Result;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n{} {}", "error:".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("Caused by: {}", cause);
            }
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => default_config_dir(),
    };
    ensure_scanner_config(&config_dir)?;

    let plan = load_scan_plan(&args.manifest)?;

    let mut backend = ProcessScannerBackend::new().with_config_dir(config_dir);
    if let Some(seconds) = args.timeout {
        backend = backend.with_timeout(Duration::from_secs(seconds));
    }
    let use_case = ComparePublishersUseCase::new(backend, StderrProgressReporter::new());

    let mut failures = 0usize;
    let report = if args.fail_fast {
        use_case
            .execute(&plan, args.concurrency)
            .await
            .map_err(|failure| anyhow!(failure))?
    } else {
        use_case
            .execute_with_handler(&plan, args.concurrency, |_publisher, _failure| {
                failures += 1;
            })
            .await
    };

    write_tables(&report, &args.out_dir)?;

    if !args.quiet {
        print_comparisons(&report)?;
    }

    if failures > 0 {
        eprintln!(
            "{}",
            format!("{} image(s) failed to scan", failures).red()
        );
        return Ok(ExitCode::ScanFailures);
    }
    Ok(ExitCode::Success)
}

/// Writes one snapshot CSV per publisher and one comparison CSV per
/// metric under the output directory.
fn write_tables(report: &CompareReport, out_dir: &std::path::Path) -> Result<()> {
    let formatter = CsvFormatter::new();

    for table in &report.snapshot_tables {
        let content = formatter
            .format_snapshot_table(table)
            .with_context(|| format!("failed to render snapshot table for {}", table.publisher()))?;
        let path = out_dir
            .join("snapshots")
            .join(format!("{}.csv", table.publisher()));
        FileSystemWriter::new(path).present(&content)?;
    }

    for table in &report.comparison_tables {
        let content = formatter
            .format_comparison_table(table)
            .with_context(|| format!("failed to render {} table", table.metric().title()))?;
        let path = out_dir
            .join("comparisons")
            .join(format!("{}.csv", table.metric().slug()));
        FileSystemWriter::new(path).present(&content)?;
    }
    Ok(())
}

fn print_comparisons(report: &CompareReport) -> Result<()> {
    let formatter = MarkdownFormatter::new();
    let presenter = StdoutPresenter::new();
    for table in &report.comparison_tables {
        let content = formatter.format_comparison_table(table)?;
        presenter.present(&content)?;
    }
    Ok(())
}

fn default_config_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".scansweep"),
        None => PathBuf::from(".scansweep"),
    }
}
