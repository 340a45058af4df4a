//! Error types for the agent loop.
//!
//! Every failure path of an executor invocation maps onto one variant of
//! [`AgentError`]. The variants are matched by discriminant, never by message,
//! so callers can tell recoverable feedback apart from fatal conditions.

use crate::types::Outcome;
use thiserror::Error;

/// Top-level error type for agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// A caller-supplied input value was not a string.
    #[error("input to executor not string: {key}")]
    InputNotString {
        /// Key of the offending input value.
        key: String,
    },

    /// The model completion could not be classified as an action or a finish.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The planner returned neither actions nor a finish.
    #[error("no actions or finish was returned by the agent")]
    NoDecision,

    /// A capability reported a failure while executing.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// The generation pipeline failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The iteration budget ran out before the agent produced a finish.
    #[error("agent not finished before max iterations")]
    NotFinished {
        /// Whatever the configuration allows to be returned alongside the error.
        partial: Outcome,
    },

    /// The caller's context was cancelled or its deadline passed.
    #[error(transparent)]
    Cancelled(#[from] ContextError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Caller inputs clash with a prompt variable the planner fills in itself.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// A required input value was not supplied.
    #[error("missing key in input values: {key}")]
    MissingInput {
        /// The key that was expected.
        key: String,
    },

    /// A chain's outcome lacked one of its declared output keys.
    #[error("missing key in output values: {key}")]
    MissingOutput {
        /// The key that was expected.
        key: String,
    },

    /// `run` was used with a chain expecting more than one input.
    #[error("run not supported in chain with more then one expected input")]
    MultipleInputs,

    /// `run` was used with a chain returning more than one output.
    #[error("run not supported in chain with more then one expected output")]
    MultipleOutputs,
}

impl AgentError {
    /// Returns `true` for the budget exhaustion error.
    #[must_use]
    pub fn is_not_finished(&self) -> bool {
        matches!(self, Self::NotFinished { .. })
    }

    /// Returns `true` if the failure came from the model's own output, so a
    /// fresh run or a larger budget may succeed.
    ///
    /// Capability, generation and contract failures are never recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::NotFinished { .. })
    }

    /// Returns `true` if a parse failure caused this error.
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns the partial result carried by the error, if any.
    #[must_use]
    pub fn partial(&self) -> Option<&Outcome> {
        match self {
            Self::NotFinished { partial } => Some(partial),
            _ => None,
        }
    }
}

/// A completion that matched neither the finish marker nor the action pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to parse agent output: {text}")]
pub struct ParseError {
    /// The raw completion text.
    pub text: String,
}

impl ParseError {
    /// Creates a parse error for the given completion text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors reported by capabilities.
#[derive(Error, Debug)]
pub enum CapabilityError {
    /// The capability rejected its argument text.
    #[error("invalid input for tool '{tool}': {reason}")]
    InvalidInput {
        /// Name of the capability.
        tool: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// Execution failed.
    #[error("tool '{tool}' execution failed: {source}")]
    ExecutionFailed {
        /// Name of the capability that failed.
        tool: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The capability observed a cancelled context.
    #[error("tool '{tool}' interrupted: {source}")]
    Interrupted {
        /// Name of the capability.
        tool: String,
        /// The context error that was observed.
        #[source]
        source: ContextError,
    },
}

impl CapabilityError {
    /// Wraps an arbitrary error as an execution failure of `tool`.
    pub fn execution<E>(tool: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::ExecutionFailed {
            tool: tool.into(),
            source: source.into(),
        }
    }
}

/// Errors raised by the generation pipeline or the provider behind it.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The provider API returned an error.
    #[error("API error: {0}")]
    Api(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The model produced an empty response.
    #[error("empty response from model")]
    EmptyResponse,

    /// The prompt could not be built.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The call observed a cancelled context.
    #[error(transparent)]
    Cancelled(#[from] ContextError),
}

/// Errors produced when a [`Context`](crate::context::Context) is done.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The context was cancelled explicitly.
    #[error("context canceled")]
    Cancelled,

    /// The context deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Errors related to configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration for '{key}': {value}")]
    Invalid {
        /// The configuration key.
        key: String,
        /// The invalid value.
        value: String,
    },
}

/// Errors raised while rendering prompt templates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder had no value.
    #[error("missing template variable: {0}")]
    MissingVariable(String),

    /// A brace was left open or closed without a partner.
    #[error("malformed template at byte {position}: {reason}")]
    Malformed {
        /// Byte offset of the problem.
        position: usize,
        /// What went wrong.
        reason: &'static str,
    },

    /// An input variable clashes with a variable the agent provides itself.
    #[error("conflict with reserved variable name: {0}")]
    ReservedVariable(String),
}
