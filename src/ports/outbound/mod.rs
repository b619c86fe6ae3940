/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the scan pipeline uses to reach
/// external systems: the scanner subprocesses, the console, and the
/// file system.
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod scanner_backend;

pub use formatter::TableFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use scanner_backend::ScannerBackend;
