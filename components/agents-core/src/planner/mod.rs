//! Planners decide, from the step history so far, what the agent does next.
//!
//! Two styles are provided:
//!
//! - [`ZeroShotPlanner`]: single-shot tool user, finishes on `Final Answer:`
//! - [`ConversationalPlanner`]: chat-oriented, finishes on `AI:`
//!
//! Both rebuild the whole scratchpad every round, call the generation
//! pipeline with stop markers that keep the model from inventing its own
//! observations, and classify the completion with an [`OutputInterpreter`].

pub mod conversational;
pub mod scratchpad;
pub mod zero_shot;

use crate::capability::Capability;
use crate::constants::{keys, markers};
use crate::context::Context;
use crate::error::{AgentError, TemplateError};
use crate::generation::{GenerationPipeline, StreamFn};
use crate::hooks::AgentHooks;
use crate::interpreter::OutputInterpreter;
use crate::types::{Decision, Inputs, Step};
use async_trait::async_trait;
use std::sync::Arc;

/// Decides the next action or the final answer.
#[async_trait]
pub trait Planner: Send + Sync {
    /// Given the steps taken so far and the caller's inputs, decides what to do next.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Parse`] for unclassifiable output and
    /// [`AgentError::Generation`] when the pipeline fails.
    async fn plan(
        &self,
        ctx: &Context,
        steps: &[Step],
        inputs: &Inputs,
    ) -> Result<Decision, AgentError>;

    /// Inputs the caller must supply; excludes the values the planner injects.
    fn input_keys(&self) -> Vec<String>;

    /// Keys of the values a finish carries.
    fn output_keys(&self) -> Vec<String>;

    /// Capabilities the planner may select.
    fn capabilities(&self) -> &[Arc<dyn Capability>];
}

/// Machinery shared by both planner styles.
pub(crate) struct PlannerCore {
    pipeline: Arc<dyn GenerationPipeline>,
    capabilities: Vec<Arc<dyn Capability>>,
    interpreter: OutputInterpreter,
    hooks: Option<Arc<dyn AgentHooks>>,
}

impl PlannerCore {
    pub(crate) fn new(
        pipeline: Arc<dyn GenerationPipeline>,
        capabilities: Vec<Arc<dyn Capability>>,
        interpreter: OutputInterpreter,
        hooks: Option<Arc<dyn AgentHooks>>,
    ) -> Self {
        Self {
            pipeline,
            capabilities,
            interpreter,
            hooks,
        }
    }

    /// Runs the pipeline on fully prepared inputs and classifies the result.
    pub(crate) async fn predict(
        &self,
        ctx: &Context,
        full_inputs: Inputs,
    ) -> Result<Decision, AgentError> {
        let stop: Vec<String> = markers::STOP_WORDS
            .iter()
            .map(ToString::to_string)
            .collect();

        let sink = self.hooks.clone();
        let forward = move |ctx: &Context, chunk: &[u8]| {
            if let Some(hooks) = &sink {
                hooks.streaming_chunk(ctx, chunk);
            }
        };
        let stream: Option<&StreamFn> = self.hooks.as_ref().map(|_| &forward as &StreamFn);

        let output = self
            .pipeline
            .generate(ctx, &full_inputs, &stop, stream)
            .await?;
        tracing::debug!(output_len = output.len(), "planner received completion");

        Ok(self.interpreter.interpret(&output)?)
    }

    pub(crate) fn input_keys(&self, injected: &[&str]) -> Vec<String> {
        self.pipeline
            .input_keys()
            .into_iter()
            .filter(|k| !injected.contains(&k.as_str()))
            .collect()
    }

    pub(crate) fn output_keys(&self) -> Vec<String> {
        vec![self.interpreter.output_key().to_string()]
    }

    pub(crate) fn capabilities(&self) -> &[Arc<dyn Capability>] {
        &self.capabilities
    }
}

/// Copies the caller's inputs and adds the scratchpad.
///
/// Fails if the caller supplied any of the `injected` variables.
pub(crate) fn with_scratchpad(
    inputs: &Inputs,
    scratchpad: String,
    injected: &[&str],
) -> Result<Inputs, AgentError> {
    if let Some(key) = injected.iter().find(|key| inputs.contains_key(**key)) {
        return Err(TemplateError::ReservedVariable((*key).to_string()).into());
    }
    let mut full = inputs.clone();
    full.insert(keys::AGENT_SCRATCHPAD.to_string(), scratchpad);
    Ok(full)
}

pub use conversational::ConversationalPlanner;
pub use zero_shot::ZeroShotPlanner;
