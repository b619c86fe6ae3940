use scansweep::prelude::*;

/// Mock ProgressReporter for testing that captures messages
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub messages: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn begin_batch(&self, label: &str, total: usize) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Batch start: {} ({})", label, total));
    }

    fn batch_progress(&self, completed: usize, total: usize) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Progress: {}/{}", completed, total));
    }

    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }

    fn finish_batch(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Batch done: {}", message));
    }
}
