use crate::context::{Context, StepData};
use crate::error::WorkflowError;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Type-safe step name wrapper.
///
/// Provides compile-time safety for step identifiers, preventing
/// typos and mismatched step names at the API level.
///
/// # Examples
///
/// ```
/// use kumiko::StepName;
///
/// let name = StepName::new("load_document");
/// assert_eq!(name.as_str(), "load_document");
///
/// // From trait for ergonomic conversion
/// let name: StepName = "validate_input".into();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StepName(String);

impl StepName {
    /// Creates a new StepName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a StepName from a type's name (extracts last segment)
    pub fn from_type_name<T: ?Sized>() -> Self {
        let full_name = std::any::type_name::<T>();
        let short_name = full_name.split("::").last().unwrap_or("UnknownStep");
        Self::new(short_name)
    }

    /// Returns the step name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StepName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StepName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for StepName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for StepName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// What a step hands back to the executor.
///
/// Replaces "merge the return value if it happens to be a mapping" with an
/// explicit choice: either the step contributes named results, or it
/// contributes nothing and the accumulator is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult<T> {
    /// The step produced no named results.
    NoUpdate,
    /// Partial results to merge into the accumulator. Keys overwrite
    /// existing accumulator keys of the same name.
    Update(StepData<T>),
}

impl<T> StepResult<T> {
    /// An update carrying a single key/value pair.
    pub fn single(key: impl Into<String>, value: T) -> Self {
        let mut data = StepData::new();
        data.insert(key, value);
        StepResult::Update(data)
    }

    /// Returns `true` if this result carries data to merge.
    pub fn is_update(&self) -> bool {
        matches!(self, StepResult::Update(_))
    }
}

impl<T> From<StepData<T>> for StepResult<T> {
    fn from(data: StepData<T>) -> Self {
        StepResult::Update(data)
    }
}

/// A unit of work within a workflow.
///
/// A step reads the host [`Context`] and the accumulator built up by the
/// steps before it, and returns either partial results or an error. Steps
/// never see each other directly; the accumulator is the only channel
/// between them.
///
/// # Type Parameter
///
/// * `T` - The type of values stored in the context and accumulator
///
/// # Examples
///
/// ```
/// use kumiko::prelude::*;
/// use async_trait::async_trait;
///
/// define_step!(LoadDocument);
///
/// #[async_trait]
/// impl Step<String> for LoadDocument {
///     async fn execute(
///         &self,
///         ctx: &Context<String>,
///         _data: &StepData<String>,
///     ) -> Result<StepResult<String>, WorkflowError> {
///         let path = ctx
///             .get("path")
///             .ok_or_else(|| WorkflowError::fatal("no path supplied"))?;
///         Ok(StepResult::single("doc", format!("contents of {path}")))
///     }
/// }
/// ```
#[async_trait]
pub trait Step<T>: Send + Sync {
    /// Executes the step logic.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The host-supplied run context
    /// * `data` - The accumulator reflecting every completed step so far
    ///
    /// # Returns
    ///
    /// - `Ok(StepResult::Update(partial))` - Merge `partial` into the accumulator
    /// - `Ok(StepResult::NoUpdate)` - Leave the accumulator unchanged
    /// - `Err(error)` - Halt the run; the executor reports this step as failed
    async fn execute(
        &self,
        ctx: &Context<T>,
        data: &StepData<T>,
    ) -> Result<StepResult<T>, WorkflowError>;

    /// Returns the step name.
    ///
    /// By default, uses the type name. Override to provide a custom name.
    fn name(&self) -> StepName {
        StepName::from_type_name::<Self>()
    }

    /// Returns the default step name from the type.
    ///
    /// Used by the builder when registering steps by type.
    fn default_name() -> StepName
    where
        Self: Sized,
    {
        StepName::from_type_name::<Self>()
    }
}
