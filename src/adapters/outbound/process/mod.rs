pub mod scanner;

pub use scanner::ProcessScannerBackend;
