//! A fuller pipeline: intent detection, gating, validation, and a flaky
//! publish step recovered with retry.

use async_trait::async_trait;
use kumiko::analysis::detect_intent;
use kumiko::format::{markdown_table, render};
use kumiko::prelude::*;
use kumiko::validate::validate_required;
use regex::Regex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

define_step!(AnalyzeStep);

#[async_trait]
impl Step<String> for AnalyzeStep {
    async fn execute(
        &self,
        ctx: &Context<String>,
        _data: &StepData<String>,
    ) -> Result<StepResult<String>, WorkflowError> {
        let input = ctx
            .get("user_input")
            .ok_or_else(|| WorkflowError::fatal("no user input supplied"))?;

        let intents = vec![
            (
                "create_skill",
                vec![Regex::new(r"(?i)\b(create|new|build)\b").map_err(to_fatal)?],
            ),
            (
                "review_skill",
                vec![Regex::new(r"(?i)\b(review|check)\b").map_err(to_fatal)?],
            ),
        ];

        let intent = detect_intent(input, &intents);
        if !gate(ctx.notify(), intent.is_some(), "no intent recognized") {
            return Err(WorkflowError::fatal("no intent recognized"));
        }

        let intent = intent.ok_or_else(|| WorkflowError::fatal("no intent recognized"))?;
        Ok(StepResult::single("intent", intent.to_string()))
    }
}

define_step!(DraftStep);

#[async_trait]
impl Step<String> for DraftStep {
    async fn execute(
        &self,
        _ctx: &Context<String>,
        data: &StepData<String>,
    ) -> Result<StepResult<String>, WorkflowError> {
        let intent = data
            .get("intent")
            .ok_or_else(|| WorkflowError::fatal("analysis did not run"))?;
        let draft = render(
            "# Skill plan\n\nIntent: {{intent}}\nStatus: drafted",
            &[("intent", intent)],
        );
        Ok(StepResult::single("draft", draft))
    }
}

define_step!(ValidateDraftStep);

#[async_trait]
impl Step<String> for ValidateDraftStep {
    async fn execute(
        &self,
        _ctx: &Context<String>,
        data: &StepData<String>,
    ) -> Result<StepResult<String>, WorkflowError> {
        let result = validate_required(data, &["intent", "draft"]);
        if !result.valid {
            return Err(WorkflowError::fatal(result.errors.join("; ")));
        }
        Ok(StepResult::NoUpdate)
    }
}

struct PublishStep {
    attempts_seen: Arc<AtomicU32>,
}

#[async_trait]
impl Step<String> for PublishStep {
    async fn execute(
        &self,
        ctx: &Context<String>,
        data: &StepData<String>,
    ) -> Result<StepResult<String>, WorkflowError> {
        let draft = data
            .get("draft")
            .ok_or_else(|| WorkflowError::fatal("nothing to publish"))?
            .clone();

        let attempts_seen = self.attempts_seen.clone();
        let receipt = with_retry(&RetryPolicy::attempts(3), ctx.notify(), || {
            let attempts_seen = attempts_seen.clone();
            let draft = draft.clone();
            async move {
                // The first two publish attempts hit a transient outage.
                if attempts_seen.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(WorkflowError::retryable("publish endpoint unavailable"))
                } else {
                    Ok(format!("published {} bytes", draft.len()))
                }
            }
        })
        .await?;

        Ok(StepResult::single("receipt", receipt))
    }
}

fn to_fatal(error: regex::Error) -> WorkflowError {
    WorkflowError::fatal(error.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let workflow = Workflow::builder()
        .register::<AnalyzeStep>()
        .register::<DraftStep>()
        .register::<ValidateDraftStep>()
        .register_named(
            "PublishStep",
            PublishStep {
                attempts_seen: Arc::new(AtomicU32::new(0)),
            },
        )
        .build();

    let mut ctx = Context::new();
    ctx.insert("user_input", "create a summarizer skill".to_string());

    let steps = [
        StepName::new("AnalyzeStep"),
        StepName::new("DraftStep"),
        StepName::new("ValidateDraftStep"),
        StepName::new("PublishStep"),
    ];

    match workflow.run(&steps, &ctx).await {
        Outcome::Success { data } => {
            let rows: Vec<Vec<String>> = data
                .iter()
                .map(|(key, value)| vec![key.clone(), value.lines().count().to_string()])
                .collect();
            println!("Pipeline succeeded:\n{}", markdown_table(&["Key", "Lines"], &rows));
        }
        Outcome::Failure {
            failed_step,
            error,
            completed_steps,
        } => {
            println!("Pipeline failed at '{failed_step}': {error}");
            println!("Completed: {completed_steps:?}");
        }
    }
}
