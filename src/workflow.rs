use crate::context::{Context, StepData};
use crate::error::WorkflowError;
use crate::step::{Step, StepName, StepResult};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Terminal result of a workflow run.
///
/// Either every step completed and `data` holds the merged accumulator, or
/// exactly one step failed and the failure names it, carries its error, and
/// lists the steps that completed before it. There is no partial success.
///
/// Serializes with a `status` discriminant (`"success"` / `"failed"`) so
/// hosts can branch on the outcome without knowing the Rust enum:
///
/// ```json
/// {"status":"failed","failed_step":"save","error":"disk full","completed_steps":["load"]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// All steps completed; `data` is the left-to-right merge of their
    /// results.
    Success {
        /// The final accumulator
        data: StepData<T>,
    },
    /// A step failed; nothing after it was invoked.
    #[serde(rename = "failed")]
    Failure {
        /// The step whose invocation (or resolution) failed
        failed_step: StepName,
        /// The error the step reported
        error: WorkflowError,
        /// Names of the steps that completed before the failure, in order
        completed_steps: Vec<StepName>,
    },
}

impl<T> Outcome<T> {
    /// Returns `true` if every step completed.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Returns `true` if the run stopped on a failure.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the final accumulator of a successful run.
    pub fn data(&self) -> Option<&StepData<T>> {
        match self {
            Outcome::Success { data } => Some(data),
            Outcome::Failure { .. } => None,
        }
    }

    /// Consumes the outcome, returning the final accumulator of a
    /// successful run.
    pub fn into_data(self) -> Option<StepData<T>> {
        match self {
            Outcome::Success { data } => Some(data),
            Outcome::Failure { .. } => None,
        }
    }
}

/// Executes ordered sequences of registered steps.
///
/// The workflow owns a registry of named steps; each call to [`run`] takes
/// the order as an explicit list, so the same registry can serve many
/// sequences. Steps run strictly one after another, each seeing the merged
/// output of everything before it.
///
/// [`run`]: Workflow::run
pub struct Workflow<T> {
    steps: HashMap<StepName, Box<dyn Step<T>>>,
}

impl<T> fmt::Debug for Workflow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("steps", &self.steps.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Workflow<T> {
    /// Creates a new workflow builder.
    pub fn builder() -> WorkflowBuilder<T> {
        WorkflowBuilder::new()
    }

    /// Returns `true` if a step with the given name is registered.
    pub fn has_step(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Returns the number of registered steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns an iterator over all registered step names.
    pub fn step_names(&self) -> impl Iterator<Item = &StepName> {
        self.steps.keys()
    }

    /// Runs the named steps in order against `ctx`.
    ///
    /// Every name is resolved against the registry before anything runs;
    /// an unknown name fails the run with [`WorkflowError::StepNotFound`]
    /// and an empty completed list, and no step is invoked. An empty list
    /// is a trivial success with empty data.
    ///
    /// For each step, a `"Step {index}/{total}: {name}"` line is emitted on
    /// the context's notification sink before invocation, so the line for a
    /// failing step still appears. A step's `Update` result is merged into
    /// the accumulator (its keys win over earlier ones); `NoUpdate` leaves
    /// the accumulator untouched. The first error stops the run, and the
    /// steps after it are never invoked.
    pub async fn run(&self, steps: &[StepName], ctx: &Context<T>) -> Outcome<T> {
        let mut resolved = Vec::with_capacity(steps.len());
        for name in steps {
            match self.steps.get(name) {
                Some(step) => resolved.push(step),
                None => {
                    warn!("Step '{}' not found in registry", name);
                    return Outcome::Failure {
                        failed_step: name.clone(),
                        error: WorkflowError::StepNotFound(name.clone()),
                        completed_steps: Vec::new(),
                    };
                }
            }
        }

        let total = steps.len();
        let mut data = StepData::new();

        for (index, (name, step)) in steps.iter().zip(resolved).enumerate() {
            ctx.emit(&format!("Step {}/{}: {}", index + 1, total, name));

            match step.execute(ctx, &data).await {
                Ok(StepResult::Update(partial)) => data.merge(partial),
                Ok(StepResult::NoUpdate) => {}
                Err(error) => {
                    warn!("Step '{}' failed: {}", name, error);
                    return Outcome::Failure {
                        failed_step: name.clone(),
                        error,
                        completed_steps: steps[..index].to_vec(),
                    };
                }
            }
        }

        Outcome::Success { data }
    }
}

/// Builder for constructing [`Workflow`] instances.
pub struct WorkflowBuilder<T> {
    steps: HashMap<StepName, Box<dyn Step<T>>>,
}

impl<T> Default for WorkflowBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkflowBuilder<T> {
    /// Creates a new empty workflow builder.
    pub fn new() -> Self {
        Self {
            steps: HashMap::new(),
        }
    }

    /// Registers a step under its type name.
    pub fn register<S: Step<T> + Default + 'static>(mut self) -> Self {
        let step = S::default();
        let name = step.name();
        self.steps.insert(name, Box::new(step));
        self
    }

    /// Registers a step under an explicit name.
    ///
    /// Registering the same name twice replaces the earlier step.
    pub fn register_named<S: Step<T> + 'static>(
        mut self,
        name: impl Into<StepName>,
        step: S,
    ) -> Self {
        self.steps.insert(name.into(), Box::new(step));
        self
    }

    /// Builds the workflow.
    pub fn build(self) -> Workflow<T> {
        Workflow { steps: self.steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_step;
    use crate::notify::MemoryNotify;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    define_step!(FirstStep);

    #[async_trait]
    impl Step<String> for FirstStep {
        async fn execute(
            &self,
            _ctx: &Context<String>,
            _data: &StepData<String>,
        ) -> Result<StepResult<String>, WorkflowError> {
            let mut out = StepData::new();
            out.insert("first", "1".to_string());
            out.insert("shared", "from_first".to_string());
            Ok(StepResult::Update(out))
        }
    }

    define_step!(SecondStep);

    #[async_trait]
    impl Step<String> for SecondStep {
        async fn execute(
            &self,
            _ctx: &Context<String>,
            data: &StepData<String>,
        ) -> Result<StepResult<String>, WorkflowError> {
            // Sees the merged output of FirstStep.
            assert_eq!(data.get("first").map(|s| s.as_str()), Some("1"));
            let mut out = StepData::new();
            out.insert("second", "2".to_string());
            out.insert("shared", "from_second".to_string());
            Ok(StepResult::Update(out))
        }
    }

    define_step!(SilentStep);

    #[async_trait]
    impl Step<String> for SilentStep {
        async fn execute(
            &self,
            _ctx: &Context<String>,
            _data: &StepData<String>,
        ) -> Result<StepResult<String>, WorkflowError> {
            Ok(StepResult::NoUpdate)
        }
    }

    define_step!(FailingStep);

    #[async_trait]
    impl Step<String> for FailingStep {
        async fn execute(
            &self,
            _ctx: &Context<String>,
            _data: &StepData<String>,
        ) -> Result<StepResult<String>, WorkflowError> {
            Err(WorkflowError::fatal("boom"))
        }
    }

    struct TouchStep {
        touched: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Step<String> for TouchStep {
        async fn execute(
            &self,
            _ctx: &Context<String>,
            _data: &StepData<String>,
        ) -> Result<StepResult<String>, WorkflowError> {
            self.touched.store(true, Ordering::SeqCst);
            Ok(StepResult::NoUpdate)
        }
    }

    fn names(raw: &[&str]) -> Vec<StepName> {
        raw.iter().map(|s| StepName::new(*s)).collect()
    }

    #[tokio::test]
    async fn test_run_merges_left_to_right() {
        let workflow = Workflow::builder()
            .register::<FirstStep>()
            .register::<SecondStep>()
            .build();

        let ctx = Context::new();
        let outcome = workflow
            .run(&names(&["FirstStep", "SecondStep"]), &ctx)
            .await;

        let data = outcome.into_data().unwrap();
        assert_eq!(data.get("first").map(|s| s.as_str()), Some("1"));
        assert_eq!(data.get("second").map(|s| s.as_str()), Some("2"));
        // Later step wins the shared key.
        assert_eq!(data.get("shared").map(|s| s.as_str()), Some("from_second"));
    }

    #[tokio::test]
    async fn test_empty_run_is_trivial_success() {
        let workflow = Workflow::<String>::builder().build();
        let ctx = Context::new();

        let outcome = workflow.run(&[], &ctx).await;
        assert!(outcome.is_success());
        assert!(outcome.data().map(|d| d.is_empty()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_no_update_leaves_accumulator_unchanged() {
        let workflow = Workflow::builder()
            .register::<FirstStep>()
            .register::<SilentStep>()
            .build();

        let ctx = Context::new();
        let outcome = workflow.run(&names(&["FirstStep", "SilentStep"]), &ctx).await;

        let data = outcome.into_data().unwrap();
        assert_eq!(data.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_reports_prefix_and_skips_rest() {
        let touched = Arc::new(AtomicBool::new(false));
        let workflow = Workflow::builder()
            .register::<FirstStep>()
            .register::<FailingStep>()
            .register_named(
                "after_failure",
                TouchStep {
                    touched: touched.clone(),
                },
            )
            .build();

        let ctx = Context::new();
        let outcome = workflow
            .run(&names(&["FirstStep", "FailingStep", "after_failure"]), &ctx)
            .await;

        match outcome {
            Outcome::Failure {
                failed_step,
                error,
                completed_steps,
            } => {
                assert_eq!(failed_step, StepName::new("FailingStep"));
                assert_eq!(error.to_string(), "boom");
                assert_eq!(completed_steps, names(&["FirstStep"]));
            }
            Outcome::Success { .. } => panic!("expected failure"),
        }
        assert!(!touched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_unknown_step_fails_before_anything_runs() {
        let touched = Arc::new(AtomicBool::new(false));
        let workflow = Workflow::builder()
            .register_named(
                "known",
                TouchStep {
                    touched: touched.clone(),
                },
            )
            .build();

        let ctx = Context::new();
        let outcome = workflow.run(&names(&["known", "missing"]), &ctx).await;

        match outcome {
            Outcome::Failure {
                failed_step,
                error,
                completed_steps,
            } => {
                assert_eq!(failed_step, StepName::new("missing"));
                assert_eq!(error, WorkflowError::StepNotFound(StepName::new("missing")));
                assert!(completed_steps.is_empty());
            }
            Outcome::Success { .. } => panic!("expected failure"),
        }
        // Eager resolution: the known step never ran either.
        assert!(!touched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_progress_is_emitted_for_every_step() {
        let notify = Arc::new(MemoryNotify::new());
        let workflow = Workflow::builder()
            .register::<FirstStep>()
            .register::<FailingStep>()
            .build();

        let ctx = Context::with_notify(notify.clone());
        let _ = workflow.run(&names(&["FirstStep", "FailingStep"]), &ctx).await;

        // The failing step's line is emitted before its invocation.
        assert_eq!(
            notify.messages(),
            vec![
                "Step 1/2: FirstStep".to_string(),
                "Step 2/2: FailingStep".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_registry_introspection() {
        let workflow = Workflow::<String>::builder()
            .register::<FirstStep>()
            .register::<SecondStep>()
            .build();

        assert!(workflow.has_step("FirstStep"));
        assert!(!workflow.has_step("ThirdStep"));
        assert_eq!(workflow.step_count(), 2);
    }
}
