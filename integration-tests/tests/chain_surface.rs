//! Integration tests for the chain surface: `run` and the `apply` worker pool.

mod common;

use anyhow::Result;
use common::{EchoProvider, RecordingHooks, config_with_steps, question};
use std::sync::Arc;
use stepwise_agents::chain::{self, Chain};
use stepwise_agents::{
    AgentError, Context, ContextError, Executor, ExecutorBuilder, ExecutorConfig, PlannerOptions,
    TemplateError, Values, ZeroShotPlanner,
};

fn echo_executor(config: Option<ExecutorConfig>) -> Result<Executor> {
    let planner = ZeroShotPlanner::from_provider(Arc::new(EchoProvider), vec![], PlannerOptions::new());
    let mut builder = ExecutorBuilder::new(Arc::new(planner));
    if let Some(config) = config {
        builder = builder.config(config);
    }
    Ok(builder.build()?)
}

#[tokio::test]
async fn test_run_returns_single_output() -> Result<()> {
    let executor = echo_executor(None)?;

    let answer = chain::run(&Context::new(), &executor, "paris").await?;

    assert_eq!(answer, " PARIS");
    Ok(())
}

#[tokio::test]
async fn test_run_with_step_history_enabled() -> Result<()> {
    let executor = echo_executor(Some(config_with_steps(5)?))?;

    let answer = chain::run(&Context::new(), &executor, "paris").await?;

    assert_eq!(answer, " PARIS");
    assert_eq!(executor.output_keys(), vec!["output".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_call_reports_missing_input() -> Result<()> {
    let executor = echo_executor(None)?;

    let err = chain::call(&Context::new(), &executor, &Values::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::MissingInput { ref key } if key == "input"));
    Ok(())
}

#[tokio::test]
async fn test_apply_keeps_input_order() -> Result<()> {
    let executor: Arc<dyn Chain> = Arc::new(echo_executor(None)?);
    let inputs: Vec<Values> = ["one", "two", "three", "four", "five", "six"]
        .into_iter()
        .map(question)
        .collect();

    let outcomes = chain::apply(&Context::new(), executor, inputs, 2).await?;

    let answers: Vec<&str> = outcomes.iter().filter_map(|o| o.output("output")).collect();
    assert_eq!(answers, vec![" ONE", " TWO", " THREE", " FOUR", " FIVE", " SIX"]);
    Ok(())
}

#[tokio::test]
async fn test_apply_propagates_failure() -> Result<()> {
    let executor: Arc<dyn Chain> = Arc::new(echo_executor(None)?);
    let inputs = vec![
        question("fine"),
        Values::from([("input".to_string(), serde_json::json!(7))]),
    ];

    let err = chain::apply(&Context::new(), executor, inputs, 0)
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::InputNotString { .. }));
    Ok(())
}

#[tokio::test]
async fn test_apply_on_cancelled_context() -> Result<()> {
    let executor: Arc<dyn Chain> = Arc::new(echo_executor(None)?);
    let ctx = Context::new();
    ctx.cancel();

    let err = chain::apply(&ctx, executor, vec![question("a"), question("b")], 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Cancelled(ContextError::Cancelled)));
    Ok(())
}

#[tokio::test]
async fn test_call_reports_chain_lifecycle_to_executor_hooks() -> Result<()> {
    let hooks = Arc::new(RecordingHooks::default());
    let planner = ZeroShotPlanner::from_provider(Arc::new(EchoProvider), vec![], PlannerOptions::new());
    let executor = ExecutorBuilder::new(Arc::new(planner))
        .hooks(hooks.clone())
        .build()?;

    chain::run(&Context::new(), &executor, "paris").await?;
    let _ = chain::call(&Context::new(), &executor, &Values::new()).await;

    assert_eq!(
        *hooks.chain_events.lock(),
        vec![
            "start".to_string(),
            "end:output".to_string(),
            "start".to_string(),
            "error:missing key in input values: input".to_string(),
        ]
    );
    assert_eq!(hooks.finishes.lock().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_call_rejects_input_shadowing_scratchpad() -> Result<()> {
    let executor = echo_executor(None)?;
    let mut values = question("paris");
    values.insert("agent_scratchpad".to_string(), serde_json::json!("forged"));

    let err = chain::call(&Context::new(), &executor, &values)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AgentError::Template(TemplateError::ReservedVariable(ref key)) if key == "agent_scratchpad"
    ));
    Ok(())
}
