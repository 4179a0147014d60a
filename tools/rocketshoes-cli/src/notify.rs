//! Terminal rendering of cart notifications.

use std::sync::atomic::{AtomicUsize, Ordering};

use rocketshoes_cart::Notifier;

use crate::output::Output;

/// Prints each notification as an error line and counts them.
pub struct OutputNotifier {
    output: Output,
    count: AtomicUsize,
}

impl OutputNotifier {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            count: AtomicUsize::new(0),
        }
    }

    /// Notifications shown so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Notifier for OutputNotifier {
    fn error(&self, message: &str) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.output.error(message);
    }
}
