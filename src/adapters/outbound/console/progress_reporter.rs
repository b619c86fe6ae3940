use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::ports::outbound::ProgressReporter;

/// StderrProgressReporter adapter for reporting scan progress to stderr
///
/// Uses indicatif for the per-batch progress bar so stdout stays clean
/// for table output. The bar lives behind a mutex because progress
/// callbacks arrive from the async collection loop.
pub struct StderrProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn new_bar(total: usize, label: &str) -> ProgressBar {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} - {msg}")
                .expect("Failed to set progress bar template")
                .progress_chars("=>-"),
        );
        bar.set_message(format!("Scanning {}", label));
        bar
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn begin_batch(&self, label: &str, total: usize) {
        let mut slot = self.bar.lock().expect("progress bar lock poisoned");
        *slot = Some(Self::new_bar(total, label));
    }

    fn batch_progress(&self, completed: usize, _total: usize) {
        if let Some(bar) = self.bar.lock().expect("progress bar lock poisoned").as_ref() {
            bar.set_position(completed as u64);
        }
    }

    fn report_error(&self, message: &str) {
        let slot = self.bar.lock().expect("progress bar lock poisoned");
        match slot.as_ref() {
            // Suspend keeps the bar intact while the message scrolls past
            Some(bar) => bar.suspend(|| eprintln!("{}", message.red())),
            None => eprintln!("{}", message.red()),
        }
    }

    fn finish_batch(&self, message: &str) {
        if let Some(bar) = self.bar.lock().expect("progress bar lock poisoned").take() {
            bar.finish_and_clear();
        }
        eprintln!("{}", message);
    }
}
