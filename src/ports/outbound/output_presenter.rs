use crate::shared::Result;

/// OutputPresenter port for delivering formatted output
///
/// Implementations decide the destination (a file, stdout); the caller
/// only hands over the final rendered content.
pub trait OutputPresenter {
    /// Presents the formatted content to the destination
    fn present(&self, content: &str) -> Result<()>;
}
