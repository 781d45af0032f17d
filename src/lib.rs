//! # Kumiko (組子)
//!
//! A sequential workflow executor for skill-authoring toolkits.
//!
//! The name "Kumiko" (組子) refers to the Japanese craft of assembling
//! small wooden pieces into lattice patterns without nails, representing
//! how this engine assembles small named steps into a complete skill
//! workflow.
//!
//! ## Features
//!
//! - **Type-safe**: [`StepName`] newtype and the [`StepResult`] sum type
//!   prevent typos and return-value guessing at compile time
//! - **Ordered execution**: steps run in exactly the order supplied, each
//!   seeing the merged output of everything before it
//! - **Structured outcomes**: a run either fully succeeds with its merged
//!   data or reports exactly one failing step and the completed prefix
//! - **Retry and gate primitives**: bounded [`with_retry`] with a
//!   retryable/fatal error split, and a non-raising [`gate`] precondition
//! - **Observable progress**: one-way [`Notify`] channel for progress and
//!   diagnostic lines, routed to `tracing` by default
//!
//! ## Quick Start
//!
//! ```rust
//! use kumiko::prelude::*;
//! use async_trait::async_trait;
//!
//! define_step!(LoadDataStep);
//!
//! #[async_trait]
//! impl Step<String> for LoadDataStep {
//!     async fn execute(
//!         &self,
//!         _ctx: &Context<String>,
//!         _data: &StepData<String>,
//!     ) -> Result<StepResult<String>, WorkflowError> {
//!         Ok(StepResult::single("data", "Hello, Kumiko!".to_string()))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let workflow = Workflow::builder().register::<LoadDataStep>().build();
//!
//! let ctx = Context::new();
//! let outcome = workflow.run(&[StepName::new("LoadDataStep")], &ctx).await;
//!
//! let data = outcome.into_data().expect("workflow failed");
//! assert_eq!(data.get("data").map(|s| s.as_str()), Some("Hello, Kumiko!"));
//! # }
//! ```
//!
//! ## Branching on the Outcome
//!
//! A run never panics and never half-succeeds; callers branch on the
//! [`Outcome`] to resume, retry, or abort:
//!
//! ```rust
//! use kumiko::prelude::*;
//! use async_trait::async_trait;
//!
//! define_step!(SaveStep);
//!
//! #[async_trait]
//! impl Step<String> for SaveStep {
//!     async fn execute(
//!         &self,
//!         _ctx: &Context<String>,
//!         _data: &StepData<String>,
//!     ) -> Result<StepResult<String>, WorkflowError> {
//!         Err(WorkflowError::fatal("disk full"))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let workflow = Workflow::builder().register::<SaveStep>().build();
//! let ctx = Context::new();
//!
//! match workflow.run(&[StepName::new("SaveStep")], &ctx).await {
//!     Outcome::Success { data } => {
//!         println!("done with {} results", data.len());
//!     }
//!     Outcome::Failure { failed_step, error, completed_steps } => {
//!         eprintln!(
//!             "{failed_step} failed ({error}) after {} steps",
//!             completed_steps.len()
//!         );
//!     }
//! }
//! # }
//! ```
//!
//! ## Retrying Inside a Step
//!
//! Only errors built with [`WorkflowError::retryable`] are retried; a
//! fatal error propagates on the first attempt no matter the budget:
//!
//! ```rust
//! use kumiko::{with_retry, MemoryNotify, RetryPolicy, WorkflowError};
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let notify = MemoryNotify::new();
//! let calls = AtomicU32::new(0);
//!
//! let result = with_retry(&RetryPolicy::attempts(3), &notify, || async {
//!     if calls.fetch_add(1, Ordering::SeqCst) == 0 {
//!         Err(WorkflowError::retryable("first try always fails"))
//!     } else {
//!         Ok("recovered")
//!     }
//! })
//! .await;
//!
//! assert_eq!(result, Ok("recovered"));
//! # }
//! ```

mod context;
mod error;
mod gate;
mod notify;
mod retry;
mod step;
mod workflow;

pub mod analysis;
pub mod files;
pub mod format;
pub mod prelude;
pub mod validate;

pub use context::{Context, StepData};
pub use error::WorkflowError;
pub use gate::gate;
pub use notify::{MemoryNotify, Notify, TracingNotify};
pub use retry::{with_retry, RetryPolicy};
pub use step::{Step, StepName, StepResult};
pub use workflow::{Outcome, Workflow, WorkflowBuilder};

/// Macro to define a step with minimal boilerplate
///
/// This macro creates a step struct with:
/// - `const NAME: &'static str` - compile-time step name
/// - `Debug` derive
/// - `Default` implementation
///
/// # Example
///
/// ```rust
/// use kumiko::define_step;
///
/// define_step!(MyStep);
/// assert_eq!(MyStep::NAME, "MyStep");
/// ```
#[macro_export]
macro_rules! define_step {
    ($name:ident) => {
        #[derive(Debug)]
        pub struct $name;

        impl $name {
            /// Step name as a compile-time constant
            #[allow(dead_code)]
            pub const NAME: &'static str = stringify!($name);
        }

        impl Default for $name {
            fn default() -> Self {
                Self
            }
        }
    };
}
