use crate::notify::{Notify, TracingNotify};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Host-supplied input for a single workflow run.
///
/// Carries the caller's data and metadata, plus the notification sink the
/// run reports progress to. Steps receive the context by shared reference
/// and never mutate it; accumulated step output lives in [`StepData`]
/// instead.
///
/// The sink is passed in at construction time rather than read from any
/// global, so two runs can report to different places.
///
/// # Examples
///
/// ```
/// use kumiko::Context;
///
/// let mut ctx = Context::new();
/// ctx.insert("user_input", "summarize the report".to_string());
/// ctx.set_metadata("skill", "summarizer".to_string());
///
/// assert_eq!(ctx.get("user_input").map(|s| s.as_str()), Some("summarize the report"));
/// ```
pub struct Context<T> {
    data: HashMap<String, T>,
    metadata: HashMap<String, String>,
    notify: Arc<dyn Notify>,
    started_at: Instant,
}

impl<T: fmt::Debug> fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("data", &self.data)
            .field("metadata", &self.metadata)
            .field("started_at", &self.started_at)
            .finish()
    }
}

impl<T> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Context<T> {
    /// Creates an empty context reporting to `tracing`.
    pub fn new() -> Self {
        Self::with_notify(Arc::new(TracingNotify))
    }

    /// Creates an empty context reporting to the given sink.
    pub fn with_notify(notify: Arc<dyn Notify>) -> Self {
        Self {
            data: HashMap::new(),
            metadata: HashMap::new(),
            notify,
            started_at: Instant::now(),
        }
    }

    /// Inserts a data value. An existing value for the key is replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        self.data.insert(key.into(), value);
    }

    /// Returns the data value for the given key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.data.get(key)
    }

    /// Returns `true` if the context holds a data value for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Sets a metadata entry.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: String) {
        self.metadata.insert(key.into(), value);
    }

    /// Returns a metadata entry.
    pub fn get_metadata(&self, key: &str) -> Option<&String> {
        self.metadata.get(key)
    }

    /// Returns the run's notification sink.
    pub fn notify(&self) -> &dyn Notify {
        self.notify.as_ref()
    }

    /// Emits a message on the run's notification sink.
    pub fn emit(&self, message: &str) {
        self.notify.emit(message);
    }

    /// Returns the time elapsed since the context was created.
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}

/// The accumulator a workflow run threads through its steps.
///
/// Named step results merge into this mapping left to right; for a shared
/// key, the later write wins. The executor owns the accumulator for the
/// duration of the run and hands the final state to the caller inside
/// [`Outcome::Success`](crate::Outcome::Success).
///
/// # Examples
///
/// ```
/// use kumiko::StepData;
///
/// let mut data = StepData::new();
/// data.insert("doc", "A".to_string());
///
/// let mut partial = StepData::new();
/// partial.insert("doc", "B".to_string());
/// partial.insert("valid", "true".to_string());
///
/// data.merge(partial);
/// assert_eq!(data.get("doc").map(|s| s.as_str()), Some("B"));
/// assert_eq!(data.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepData<T> {
    entries: HashMap<String, T>,
}

impl<T> Default for StepData<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StepData<T> {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts a value. An existing value for the key is replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), value);
    }

    /// Returns the value for the given key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    /// Returns `true` if the accumulator holds a value for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the accumulator holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Folds a partial result in. Keys from `partial` overwrite existing
    /// keys of the same name.
    pub fn merge(&mut self, partial: StepData<T>) {
        self.entries.extend(partial.entries);
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &T)> {
        self.entries.iter()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Consumes the accumulator, returning the underlying map.
    pub fn into_inner(self) -> HashMap<String, T> {
        self.entries
    }
}

impl<T> From<HashMap<String, T>> for StepData<T> {
    fn from(entries: HashMap<String, T>) -> Self {
        Self { entries }
    }
}

impl<T, K: Into<String>> FromIterator<(K, T)> for StepData<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
