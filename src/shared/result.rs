/// Type alias for Result with anyhow::Error as the error type.
/// Used at application edges (config, manifest, file I/O); the scan
/// pipeline itself returns the typed errors from `shared::error`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
