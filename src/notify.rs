//! One-way notification channel for progress and diagnostic lines.

use std::sync::Mutex;

/// A fire-and-forget sink for human-readable progress lines.
///
/// The executor emits a line before each step, and the [`gate`] and
/// [`with_retry`] primitives emit their diagnostics through the same
/// channel. Messages are not part of the workflow outcome; hosts decide
/// where the stream goes (a log, a UI pane, nowhere).
///
/// [`gate`]: crate::gate
/// [`with_retry`]: crate::with_retry
pub trait Notify: Send + Sync {
    /// Delivers a single message. No acknowledgment, no backpressure.
    fn emit(&self, message: &str);
}

/// Routes notifications to `tracing` at info level.
///
/// The default sink for [`Context`](crate::Context).
#[derive(Debug, Default)]
pub struct TracingNotify;

impl Notify for TracingNotify {
    fn emit(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Collects notifications in memory.
///
/// Useful in tests and for hosts that render the stream themselves.
///
/// # Examples
///
/// ```
/// use kumiko::{MemoryNotify, Notify};
///
/// let notify = MemoryNotify::new();
/// notify.emit("Step 1/2: load");
/// assert_eq!(notify.messages(), vec!["Step 1/2: load".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryNotify {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotify {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every message emitted so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notify for MemoryNotify {
    fn emit(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
