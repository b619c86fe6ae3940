/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_scanner_backend;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scanner_backend::MockScannerBackend;
