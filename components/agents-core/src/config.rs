//! Configuration for executors and planners.
//!
//! Provides a strongly-typed configuration system with environment variable
//! support and sensible defaults. Configuration is fixed when an executor is
//! built and never changes afterwards.

use crate::constants::{defaults, keys};
use crate::error::ConfigError;
use crate::hooks::AgentHooks;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Formats a parse failure into the observation fed back to the model.
pub type ErrorFormatter = dyn Fn(&str) -> String + Send + Sync;

/// Recovery policy for unparseable model output.
///
/// When configured, a parse failure becomes an observation instead of
/// aborting the run, so the model can correct itself on the next round.
#[derive(Clone, Default)]
pub struct ParserErrorHandler {
    formatter: Option<Arc<ErrorFormatter>>,
}

impl ParserErrorHandler {
    /// Feeds the error text back unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the error text back through `formatter`.
    pub fn with_formatter<F>(formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            formatter: Some(Arc::new(formatter)),
        }
    }

    /// Produces the observation for a parse failure message.
    #[must_use]
    pub fn format(&self, error_text: &str) -> String {
        match &self.formatter {
            Some(f) => f(error_text),
            None => error_text.to_string(),
        }
    }
}

impl std::fmt::Debug for ParserErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserErrorHandler")
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Executor configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Maximum number of planner rounds per invocation.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Key under which the final answer is returned.
    #[serde(default = "default_output_key")]
    pub output_key: String,

    /// Whether the step history is returned alongside the answer.
    #[serde(default)]
    pub return_intermediate_steps: bool,

    /// Whether to log each round at `info` level.
    #[serde(default)]
    pub verbose: bool,

    /// Recovery policy for parse failures; absent means parse failures are fatal.
    #[serde(skip)]
    pub parser_error_handler: Option<ParserErrorHandler>,
}

impl ExecutorConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from environment variables.
    ///
    /// Environment variables are prefixed with `STEPWISE_`.
    /// For example: `STEPWISE_MAX_ITERATIONS=10`
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds a value of the wrong type or the
    /// resulting configuration is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STEPWISE_MAX_ITERATIONS") {
            config.max_iterations = val.parse().map_err(|_| ConfigError::Invalid {
                key: "max_iterations".to_string(),
                value: val,
            })?;
        }

        if let Ok(val) = std::env::var("STEPWISE_OUTPUT_KEY") {
            config.output_key = val;
        }

        if let Ok(val) = std::env::var("STEPWISE_RETURN_INTERMEDIATE_STEPS") {
            config.return_intermediate_steps = parse_flag("return_intermediate_steps", val)?;
        }

        if let Ok(val) = std::env::var("STEPWISE_VERBOSE") {
            config.verbose = parse_flag("verbose", val)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the iteration budget is zero or the output key is empty.
    pub fn validate(&self) -> Result<&Self, ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid {
                key: "max_iterations".to_string(),
                value: "0".to_string(),
            });
        }

        if self.output_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "output_key".to_string(),
                value: "empty".to_string(),
            });
        }

        Ok(self)
    }

    /// Returns a builder for creating configuration.
    #[must_use]
    pub fn builder() -> ExecutorConfigBuilder {
        ExecutorConfigBuilder::default()
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            output_key: default_output_key(),
            return_intermediate_steps: false,
            verbose: false,
            parser_error_handler: None,
        }
    }
}

/// Builder for constructing [`ExecutorConfig`].
#[derive(Debug, Default)]
pub struct ExecutorConfigBuilder {
    max_iterations: Option<u32>,
    output_key: Option<String>,
    return_intermediate_steps: Option<bool>,
    verbose: Option<bool>,
    parser_error_handler: Option<ParserErrorHandler>,
}

impl ExecutorConfigBuilder {
    /// Sets the iteration budget.
    #[must_use]
    pub fn max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Sets the output key.
    #[must_use]
    pub fn output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    /// Returns the step history alongside the answer.
    #[must_use]
    pub fn return_intermediate_steps(mut self, enabled: bool) -> Self {
        self.return_intermediate_steps = Some(enabled);
        self
    }

    /// Sets whether to log each round at `info` level.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Installs a parse-failure recovery policy.
    #[must_use]
    pub fn parser_error_handler(mut self, handler: ParserErrorHandler) -> Self {
        self.parser_error_handler = Some(handler);
        self
    }

    /// Builds the configuration, validating all values.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn build(self) -> Result<ExecutorConfig, ConfigError> {
        let mut config = ExecutorConfig::default();

        if let Some(v) = self.max_iterations {
            config.max_iterations = v;
        }
        if let Some(v) = self.output_key {
            config.output_key = v;
        }
        if let Some(v) = self.return_intermediate_steps {
            config.return_intermediate_steps = v;
        }
        if let Some(v) = self.verbose {
            config.verbose = v;
        }
        config.parser_error_handler = self.parser_error_handler;

        config.validate()?;
        Ok(config)
    }
}

/// Options shared by both planner styles.
///
/// Unset prompt parts fall back to the style's defaults.
#[derive(Clone)]
pub struct PlannerOptions {
    /// Key under which the planner stores its answer.
    pub output_key: String,
    /// Replaces the prompt prefix.
    pub prompt_prefix: Option<String>,
    /// Replaces the format instructions.
    pub format_instructions: Option<String>,
    /// Replaces the prompt suffix.
    pub prompt_suffix: Option<String>,
    /// Replaces the whole prompt.
    pub prompt: Option<PromptTemplate>,
    /// Receives streamed chunks.
    pub hooks: Option<Arc<dyn AgentHooks>>,
}

impl PlannerOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output key.
    #[must_use]
    pub fn output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = key.into();
        self
    }

    /// Sets the prompt prefix.
    #[must_use]
    pub fn prompt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prompt_prefix = Some(prefix.into());
        self
    }

    /// Sets the format instructions.
    #[must_use]
    pub fn format_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.format_instructions = Some(instructions.into());
        self
    }

    /// Sets the prompt suffix.
    #[must_use]
    pub fn prompt_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.prompt_suffix = Some(suffix.into());
        self
    }

    /// Replaces the whole prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Sets the hooks receiving streamed chunks.
    #[must_use]
    pub fn hooks(mut self, hooks: Arc<dyn AgentHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            output_key: default_output_key(),
            prompt_prefix: None,
            format_instructions: None,
            prompt_suffix: None,
            prompt: None,
            hooks: None,
        }
    }
}

impl std::fmt::Debug for PlannerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerOptions")
            .field("output_key", &self.output_key)
            .field("prompt_prefix", &self.prompt_prefix)
            .field("format_instructions", &self.format_instructions)
            .field("prompt_suffix", &self.prompt_suffix)
            .field("prompt", &self.prompt)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

fn parse_flag(key: &str, val: String) -> Result<bool, ConfigError> {
    match val.to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: val,
        }),
    }
}

// Default value functions
fn default_max_iterations() -> u32 {
    defaults::MAX_ITERATIONS
}

fn default_output_key() -> String {
    keys::OUTPUT.to_string()
}
