//! Single-shot tool-using planner.

use crate::capability::Capability;
use crate::config::PlannerOptions;
use crate::constants::keys;
use crate::context::Context;
use crate::error::AgentError;
use crate::generation::{CompletionProvider, GenerationPipeline, PromptPipeline};
use crate::interpreter::OutputInterpreter;
use crate::planner::{Planner, PlannerCore, scratchpad, with_scratchpad};
use crate::prompt::{
    PromptBuilder, ZERO_SHOT_FORMAT_INSTRUCTIONS, ZERO_SHOT_PREFIX, ZERO_SHOT_SUFFIX,
};
use crate::types::{Decision, Inputs, Step};
use async_trait::async_trait;
use std::sync::Arc;

/// Planner optimized for plain completion models.
///
/// Injects the current date as `today` and the scratchpad as
/// `agent_scratchpad`; the model finishes by writing `Final Answer:`.
pub struct ZeroShotPlanner {
    core: PlannerCore,
}

impl ZeroShotPlanner {
    /// Creates a planner over an existing pipeline.
    ///
    /// The pipeline's prompt should accept `agent_scratchpad` and `today`.
    pub fn new(
        pipeline: Arc<dyn GenerationPipeline>,
        capabilities: Vec<Arc<dyn Capability>>,
        options: PlannerOptions,
    ) -> Self {
        Self {
            core: PlannerCore::new(
                pipeline,
                capabilities,
                OutputInterpreter::zero_shot(options.output_key),
                options.hooks,
            ),
        }
    }

    /// Creates a planner rendering the default zero-shot prompt for `provider`.
    pub fn from_provider(
        provider: Arc<dyn CompletionProvider>,
        capabilities: Vec<Arc<dyn Capability>>,
        options: PlannerOptions,
    ) -> Self {
        let prompt = options.prompt.clone().unwrap_or_else(|| {
            PromptBuilder::zero_shot(
                &capabilities,
                options.prompt_prefix.as_deref().unwrap_or(ZERO_SHOT_PREFIX),
                options
                    .format_instructions
                    .as_deref()
                    .unwrap_or(ZERO_SHOT_FORMAT_INSTRUCTIONS),
                options.prompt_suffix.as_deref().unwrap_or(ZERO_SHOT_SUFFIX),
            )
        });
        let pipeline = Arc::new(PromptPipeline::new(prompt, provider));
        Self::new(pipeline, capabilities, options)
    }
}

impl std::fmt::Debug for ZeroShotPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroShotPlanner")
            .field("capabilities", &self.core.capabilities().len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Planner for ZeroShotPlanner {
    async fn plan(
        &self,
        ctx: &Context,
        steps: &[Step],
        inputs: &Inputs,
    ) -> Result<Decision, AgentError> {
        let mut full = with_scratchpad(inputs, scratchpad::zero_shot(steps), &keys::RESERVED)?;
        full.insert(
            keys::TODAY.to_string(),
            chrono::Local::now().format("%B %d, %Y").to_string(),
        );
        self.core.predict(ctx, full).await
    }

    fn input_keys(&self) -> Vec<String> {
        self.core.input_keys(&keys::RESERVED)
    }

    fn output_keys(&self) -> Vec<String> {
        self.core.output_keys()
    }

    fn capabilities(&self) -> &[Arc<dyn Capability>] {
        self.core.capabilities()
    }
}
