/// ProgressReporter port for batch scan feedback
///
/// Progress is an observable side effect only, not part of the scan
/// contract. Implementations write to stderr so stdout stays clean for
/// data output.
pub trait ProgressReporter: Send + Sync {
    /// Reports a free-form status message
    fn report(&self, message: &str);

    /// Announces the start of a batch of `total` images
    ///
    /// # Arguments
    /// * `label` - The batch label (e.g. a publisher name)
    /// * `total` - Number of images in the batch
    fn begin_batch(&self, label: &str, total: usize);

    /// Reports that `completed` of `total` images have finished
    fn batch_progress(&self, completed: usize, total: usize);

    /// Reports a warning or per-image failure
    fn report_error(&self, message: &str);

    /// Closes the current batch, clearing any progress display
    fn finish_batch(&self, message: &str);
}
