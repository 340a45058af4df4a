//! Conversational planner.
//!
//! Tool-using agents are usually tuned for reaching an answer through tools,
//! which reads poorly in a chat. This style lets the model either call a tool
//! or talk to the user directly by writing `AI:`.

use crate::capability::Capability;
use crate::config::PlannerOptions;
use crate::constants::keys;
use crate::context::Context;
use crate::error::AgentError;
use crate::generation::{CompletionProvider, GenerationPipeline, PromptPipeline};
use crate::interpreter::OutputInterpreter;
use crate::planner::{Planner, PlannerCore, scratchpad, with_scratchpad};
use crate::prompt::{
    CONVERSATIONAL_FORMAT_INSTRUCTIONS, CONVERSATIONAL_PREFIX, CONVERSATIONAL_SUFFIX,
    PromptBuilder,
};
use crate::types::{Decision, Inputs, Step};
use async_trait::async_trait;
use std::sync::Arc;

/// Planner for chat-style agents.
pub struct ConversationalPlanner {
    core: PlannerCore,
}

impl ConversationalPlanner {
    /// Creates a planner over an existing pipeline.
    ///
    /// The pipeline's prompt should accept `agent_scratchpad`.
    pub fn new(
        pipeline: Arc<dyn GenerationPipeline>,
        capabilities: Vec<Arc<dyn Capability>>,
        options: PlannerOptions,
    ) -> Self {
        Self {
            core: PlannerCore::new(
                pipeline,
                capabilities,
                OutputInterpreter::conversational(options.output_key),
                options.hooks,
            ),
        }
    }

    /// Creates a planner rendering the default conversational prompt for `provider`.
    pub fn from_provider(
        provider: Arc<dyn CompletionProvider>,
        capabilities: Vec<Arc<dyn Capability>>,
        options: PlannerOptions,
    ) -> Self {
        let prompt = options.prompt.clone().unwrap_or_else(|| {
            PromptBuilder::conversational(
                &capabilities,
                options
                    .prompt_prefix
                    .as_deref()
                    .unwrap_or(CONVERSATIONAL_PREFIX),
                options
                    .format_instructions
                    .as_deref()
                    .unwrap_or(CONVERSATIONAL_FORMAT_INSTRUCTIONS),
                options
                    .prompt_suffix
                    .as_deref()
                    .unwrap_or(CONVERSATIONAL_SUFFIX),
            )
        });
        let pipeline = Arc::new(PromptPipeline::new(prompt, provider));
        Self::new(pipeline, capabilities, options)
    }
}

impl std::fmt::Debug for ConversationalPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationalPlanner")
            .field("capabilities", &self.core.capabilities().len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Planner for ConversationalPlanner {
    async fn plan(
        &self,
        ctx: &Context,
        steps: &[Step],
        inputs: &Inputs,
    ) -> Result<Decision, AgentError> {
        let full = with_scratchpad(
            inputs,
            scratchpad::conversational(steps),
            &[keys::AGENT_SCRATCHPAD],
        )?;
        self.core.predict(ctx, full).await
    }

    fn input_keys(&self) -> Vec<String> {
        self.core.input_keys(&[keys::AGENT_SCRATCHPAD])
    }

    fn output_keys(&self) -> Vec<String> {
        self.core.output_keys()
    }

    fn capabilities(&self) -> &[Arc<dyn Capability>] {
        self.core.capabilities()
    }
}
