use async_trait::async_trait;
use kumiko::prelude::*;

define_step!(LoadDataStep);

#[async_trait]
impl Step<String> for LoadDataStep {
    async fn execute(
        &self,
        _ctx: &Context<String>,
        _data: &StepData<String>,
    ) -> Result<StepResult<String>, WorkflowError> {
        println!("Loading data...");
        Ok(StepResult::single("data", "sample data".to_string()))
    }
}

define_step!(ProcessDataStep);

#[async_trait]
impl Step<String> for ProcessDataStep {
    async fn execute(
        &self,
        _ctx: &Context<String>,
        data: &StepData<String>,
    ) -> Result<StepResult<String>, WorkflowError> {
        let raw = data
            .get("data")
            .ok_or_else(|| WorkflowError::fatal("nothing loaded"))?;
        Ok(StepResult::single("processed", format!("{raw}_processed")))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let workflow = Workflow::builder()
        .register::<LoadDataStep>()
        .register::<ProcessDataStep>()
        .build();

    let ctx = Context::new();
    let steps = [
        StepName::new("LoadDataStep"),
        StepName::new("ProcessDataStep"),
    ];

    match workflow.run(&steps, &ctx).await {
        Outcome::Success { data } => {
            println!("Workflow completed successfully");
            for (key, value) in data.iter() {
                println!("  {key} = {value}");
            }
        }
        Outcome::Failure {
            failed_step,
            error,
            completed_steps,
        } => {
            println!("Workflow failed at '{failed_step}': {error}");
            println!("Completed before failure: {completed_steps:?}");
        }
    }
}
