//! Commonly used types and traits

pub use crate::context::{Context, StepData};
pub use crate::define_step;
pub use crate::error::WorkflowError;
pub use crate::gate::gate;
pub use crate::notify::{MemoryNotify, Notify};
pub use crate::retry::{with_retry, RetryPolicy};
pub use crate::step::{Step, StepName, StepResult};
pub use crate::workflow::{Outcome, Workflow};
