//! Shopper notifications.

use std::sync::Mutex;

/// Sink for user-visible failure messages (the storefront's toast).
pub trait Notifier: Send + Sync {
    /// Show an error message.
    fn error(&self, message: &str);
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(notification = message, "cart notification");
    }
}

/// Notifier that keeps every message, in order.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Number of messages received.
    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take and clear the received messages.
    pub fn drain(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_notifier() {
        let notifier = CollectingNotifier::new();
        assert!(notifier.is_empty());

        notifier.error("a");
        notifier.error("b");
        assert_eq!(notifier.messages(), vec!["a", "b"]);

        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.is_empty());
    }
}
