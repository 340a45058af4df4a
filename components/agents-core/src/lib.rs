//! Stepwise Agents - plan, act, observe over a text-generation model.
//!
//! An [`Executor`] repeatedly asks a [`Planner`] what to do next. The planner
//! renders the step history into a prompt, asks a generation pipeline for a
//! completion and classifies it as either capability calls or a final answer.
//! The executor runs the selected [`Capability`] implementations, records each
//! result as an observation and loops until the planner finishes or the
//! iteration budget runs out.
//!
//! # Features
//!
//! - **Error Handling**: one [`AgentError`] variant per failure class, built with `thiserror`
//! - **Configuration**: [`ExecutorConfig`] with builder, validation and environment loading
//! - **Planners**: zero-shot and conversational styles sharing one [`Planner`] trait
//! - **Hooks**: tracing, writer and fan-out observers of the agent lifecycle
//! - **Chains**: single-input [`chain::run`] and worker-pool [`chain::apply`]
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use std::sync::Arc;
//! use stepwise_agents::{
//!     Capability, CompletionProvider, Context, ExecutorBuilder, ExecutorConfig, FnCapability,
//!     GenerationError, PlannerOptions, StreamFn, ZeroShotPlanner,
//! };
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl CompletionProvider for Canned {
//!     async fn complete(
//!         &self,
//!         _ctx: &Context,
//!         _prompt: &str,
//!         _stop: &[String],
//!         _stream: Option<&StreamFn>,
//!     ) -> Result<String, GenerationError> {
//!         Ok("Thought: I know.\nFinal Answer: 42".to_string())
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let search: Arc<dyn Capability> = Arc::new(FnCapability::new(
//!     "Search",
//!     "Searches the web",
//!     |_ctx, query| async move { Ok(format!("results for {query}")) },
//! ));
//!
//! let planner = ZeroShotPlanner::from_provider(Arc::new(Canned), vec![search], PlannerOptions::new());
//! let executor = ExecutorBuilder::new(Arc::new(planner))
//!     .config(ExecutorConfig::builder().max_iterations(10).build()?)
//!     .build()?;
//!
//! let answer = stepwise_agents::chain::run(&Context::new(), &executor, "What is the answer?").await?;
//! assert_eq!(answer, " 42");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]

pub mod capability;
pub mod chain;
pub mod config;
pub mod constants;
pub mod context;
pub mod engine;
pub mod error;
pub mod generation;
pub mod hooks;
pub mod interpreter;
pub mod planner;
pub mod prompt;
pub mod types;

// Re-export commonly used types
pub use capability::{Capability, CapabilityTable, FnCapability};
pub use chain::Chain;
pub use config::{ExecutorConfig, ExecutorConfigBuilder, ParserErrorHandler, PlannerOptions};
pub use context::Context;
pub use engine::{Executor, ExecutorBuilder, Phase};
pub use error::{
    AgentError, CapabilityError, ConfigError, ContextError, GenerationError, ParseError,
    TemplateError,
};
pub use generation::{CompletionProvider, GenerationPipeline, PromptPipeline, StreamFn};
pub use hooks::{AgentHooks, MultiHooks, NoopHooks, TracingHooks, WriterHooks};
pub use interpreter::OutputInterpreter;
pub use planner::{ConversationalPlanner, Planner, ZeroShotPlanner};
pub use prompt::{PromptBuilder, PromptTemplate};
pub use types::{Action, Decision, Finish, Inputs, Outcome, Step, Values};

/// Version of the agents crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes logging.
///
/// Installs a `fmt` subscriber filtered by `RUST_LOG`. This should be called
/// once at the start of the application.
///
/// # Errors
///
/// Returns an error if the tracing subscriber has already been set.
pub fn init_logging() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
