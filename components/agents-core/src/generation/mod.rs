//! Boundary to the text-generation model.
//!
//! The core only needs one operation: named inputs plus stop markers in, one
//! completion out. [`GenerationPipeline`] is that operation. [`PromptPipeline`]
//! is a ready-made implementation that renders a [`PromptTemplate`] and hands
//! the prompt to a [`CompletionProvider`].
//!
//! [`PromptTemplate`]: crate::prompt::PromptTemplate

pub mod pipeline;

use crate::context::Context;
use crate::error::GenerationError;
use crate::types::Inputs;
use async_trait::async_trait;

/// Callback receiving streamed chunks of a completion.
pub type StreamFn = dyn Fn(&Context, &[u8]) + Send + Sync;

/// Single-shot text generation over named inputs.
///
/// Pipelines are stateless between calls: everything the model should see
/// must be in `inputs`.
#[async_trait]
pub trait GenerationPipeline: Send + Sync {
    /// Names of the inputs the pipeline expects.
    fn input_keys(&self) -> Vec<String>;

    /// Produces one completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be built or the provider fails.
    async fn generate(
        &self,
        ctx: &Context,
        inputs: &Inputs,
        stop: &[String],
        stream: Option<&StreamFn>,
    ) -> Result<String, GenerationError>;
}

/// A model provider completing a fully rendered prompt.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Completes `prompt`, stopping before any of `stop`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    async fn complete(
        &self,
        ctx: &Context,
        prompt: &str,
        stop: &[String],
        stream: Option<&StreamFn>,
    ) -> Result<String, GenerationError>;
}

pub use pipeline::PromptPipeline;
