use crate::step::StepName;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors surfaced by steps and the workflow engine.
///
/// The retryable/fatal split is the load-bearing distinction in the crate:
/// only an error explicitly constructed as [`Retryable`] is eligible for
/// re-invocation under [`with_retry`]; everything else propagates
/// immediately, regardless of remaining attempts.
///
/// # Non-Exhaustive
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code. When matching
/// on this error, always include a wildcard pattern.
///
/// [`Retryable`]: WorkflowError::Retryable
/// [`with_retry`]: crate::with_retry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkflowError {
    /// A transient failure, eligible for retry.
    ///
    /// Step authors opt in to retry by constructing this variant; nothing
    /// is classified as transient automatically.
    #[error("{details}")]
    Retryable {
        /// Details about the failure
        details: String,
    },

    /// A permanent failure. Propagates without consuming retry attempts.
    #[error("{details}")]
    Fatal {
        /// Details about the failure
        details: String,
    },

    /// A step name did not resolve against the workflow's registry.
    ///
    /// Raised before any step runs; the run's step list is resolved
    /// eagerly, so an unknown name is never discovered mid-execution.
    #[error("Step not found: {0}")]
    StepNotFound(StepName),
}

impl WorkflowError {
    /// Creates a retryable error.
    pub fn retryable(details: impl Into<String>) -> Self {
        WorkflowError::Retryable {
            details: details.into(),
        }
    }

    /// Creates a fatal error.
    pub fn fatal(details: impl Into<String>) -> Self {
        WorkflowError::Fatal {
            details: details.into(),
        }
    }

    /// Returns `true` only for [`WorkflowError::Retryable`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, WorkflowError::Retryable { .. })
    }
}

// Serializes as the display message so an `Outcome::Failure` carries the
// error exactly as the step reported it.
impl Serialize for WorkflowError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = WorkflowError::fatal("disk full");
        assert_eq!(error.to_string(), "disk full");

        let error = WorkflowError::retryable("connection reset");
        assert_eq!(error.to_string(), "connection reset");

        let error = WorkflowError::StepNotFound(StepName::new("missing"));
        assert_eq!(error.to_string(), "Step not found: missing");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(WorkflowError::retryable("transient").is_retryable());
        assert!(!WorkflowError::fatal("permanent").is_retryable());
        assert!(!WorkflowError::StepNotFound(StepName::new("x")).is_retryable());
    }
}
