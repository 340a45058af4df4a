//! Template-plus-provider generation pipeline.

use crate::context::Context;
use crate::error::GenerationError;
use crate::generation::{CompletionProvider, GenerationPipeline, StreamFn};
use crate::prompt::PromptTemplate;
use crate::types::Inputs;
use async_trait::async_trait;
use std::sync::Arc;

/// Renders a prompt template and forwards it to a provider.
pub struct PromptPipeline {
    template: PromptTemplate,
    provider: Arc<dyn CompletionProvider>,
}

impl PromptPipeline {
    /// Creates a pipeline.
    pub fn new(template: PromptTemplate, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { template, provider }
    }

    /// The template this pipeline renders.
    #[must_use]
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }
}

impl std::fmt::Debug for PromptPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptPipeline")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl GenerationPipeline for PromptPipeline {
    fn input_keys(&self) -> Vec<String> {
        self.template.input_variables().to_vec()
    }

    async fn generate(
        &self,
        ctx: &Context,
        inputs: &Inputs,
        stop: &[String],
        stream: Option<&StreamFn>,
    ) -> Result<String, GenerationError> {
        ctx.check()?;
        let prompt = self.template.render(inputs)?;
        tracing::debug!(prompt_len = prompt.len(), "rendered prompt");

        let completion = self.provider.complete(ctx, &prompt, stop, stream).await?;
        if completion.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(completion)
    }
}
