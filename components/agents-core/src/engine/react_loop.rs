//! Plan, act, observe loop.

use crate::capability::CapabilityTable;
use crate::capability::registry::unknown_capability_observation;
use crate::config::ExecutorConfig;
use crate::constants::{keys, markers};
use crate::context::Context;
use crate::engine::state::RunState;
use crate::error::{AgentError, ConfigError};
use crate::hooks::{AgentHooks, NoopHooks};
use crate::planner::Planner;
use crate::types::{Action, Decision, Finish, Inputs, Outcome, Step, Values};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Drives a planner until it finishes or the iteration budget runs out.
///
/// An executor holds no per-invocation state; every [`call`](Self::call)
/// starts from an empty step history, so one executor can serve concurrent
/// invocations.
pub struct Executor {
    planner: Arc<dyn Planner>,
    config: ExecutorConfig,
    hooks: Arc<dyn AgentHooks>,
}

impl Executor {
    /// Creates an executor without hooks.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] if `config` fails validation or its
    /// output key is not one the planner produces.
    pub fn new(planner: Arc<dyn Planner>, config: ExecutorConfig) -> Result<Self, AgentError> {
        Self::with_hooks(planner, config, Arc::new(NoopHooks))
    }

    pub(crate) fn with_hooks(
        planner: Arc<dyn Planner>,
        config: ExecutorConfig,
        hooks: Arc<dyn AgentHooks>,
    ) -> Result<Self, AgentError> {
        config.validate()?;
        if !planner.output_keys().contains(&config.output_key) {
            return Err(ConfigError::Invalid {
                key: "output_key".to_string(),
                value: config.output_key,
            }
            .into());
        }
        Ok(Self {
            planner,
            config,
            hooks,
        })
    }

    /// Runs the agent on `values`.
    ///
    /// Every value must be a JSON string. On success the outcome holds the
    /// planner's finish values and, if configured, the step history.
    ///
    /// # Errors
    ///
    /// - [`AgentError::InputNotString`] if an input value is not a string
    /// - [`AgentError::Template`] if an input shadows a variable the planner
    ///   fills in itself
    /// - [`AgentError::Cancelled`] if `ctx` is cancelled or past its deadline
    ///   before a round starts
    /// - [`AgentError::Parse`] for unparseable output when no
    ///   [`ParserErrorHandler`](crate::config::ParserErrorHandler) is configured
    /// - [`AgentError::NoDecision`] if the planner returns an empty action list
    /// - [`AgentError::Capability`] if a capability fails
    /// - [`AgentError::Generation`] if the generation pipeline fails
    /// - [`AgentError::NotFinished`] when the iteration budget runs out
    pub async fn call(&self, ctx: &Context, values: &Values) -> Result<Outcome, AgentError> {
        let inputs = string_inputs(values)?;
        let table = CapabilityTable::from_capabilities(self.planner.capabilities());
        let max = self.config.max_iterations;
        let mut state = RunState::new();

        tracing::debug!(capabilities = ?table.names(), max_iterations = max, "executor started");

        while let Some(round) = state.next_round(max) {
            ctx.check()?;

            if self.config.verbose {
                tracing::info!("Agent round {}/{}", round + 1, max);
            } else {
                tracing::debug!(round, steps = state.steps.len(), "agent round");
            }

            let decision = match self.planner.plan(ctx, &state.steps, &inputs).await {
                Ok(decision) => decision,
                Err(AgentError::Parse(err)) => {
                    let Some(handler) = &self.config.parser_error_handler else {
                        tracing::error!(round, "unparseable agent output");
                        return Err(err.into());
                    };
                    tracing::warn!(round, "unparseable agent output fed back as observation");
                    state.record(Step::new(Action::default(), handler.format(&err.to_string())));
                    continue;
                }
                Err(err) => {
                    tracing::error!(round, error = %err, "planner failed");
                    return Err(err);
                }
            };

            match decision {
                Decision::Finish(finish) => {
                    self.hooks.agent_finish(ctx, &finish);
                    state.finish();
                    tracing::debug!(phase = ?state.phase(), rounds = round + 1, "agent finished");
                    return Ok(state
                        .into_outcome(finish.return_values, self.config.return_intermediate_steps));
                }
                Decision::Actions(actions) if actions.is_empty() => {
                    tracing::error!(round, "planner returned neither actions nor a finish");
                    return Err(AgentError::NoDecision);
                }
                Decision::Actions(actions) => {
                    for action in actions {
                        let step = self.dispatch(ctx, &table, action).await?;
                        state.record(step);
                    }
                }
            }
        }

        tracing::warn!(phase = ?state.phase(), max_iterations = max, "iteration budget exhausted");
        self.hooks.agent_finish(
            ctx,
            &Finish::new(keys::OUTPUT, markers::NOT_FINISHED, String::new()),
        );
        Err(AgentError::NotFinished {
            partial: state.into_outcome(BTreeMap::new(), self.config.return_intermediate_steps),
        })
    }

    /// Executes one action and turns the result into a step.
    async fn dispatch(
        &self,
        ctx: &Context,
        table: &CapabilityTable,
        action: Action,
    ) -> Result<Step, AgentError> {
        self.hooks.agent_action(ctx, &action);

        let Some(capability) = table.lookup(&action.tool) else {
            tracing::warn!(tool = %action.tool, "agent selected an unknown capability");
            let observation = unknown_capability_observation(&action.tool);
            return Ok(Step::new(action, observation));
        };

        match capability.call(ctx, &action.tool_input).await {
            Ok(observation) => {
                tracing::debug!(tool = %action.tool, len = observation.len(), "capability returned");
                Ok(Step::new(action, observation))
            }
            Err(err) => {
                tracing::error!(tool = %action.tool, error = %err, "capability failed");
                Err(err.into())
            }
        }
    }

    /// Inputs the caller must supply.
    #[must_use]
    pub fn input_keys(&self) -> Vec<String> {
        self.planner.input_keys()
    }

    /// Keys of the answer values a successful outcome carries.
    ///
    /// The step history is reported through [`Outcome::steps`] and is never
    /// listed here, so single-output helpers keep working when it is enabled.
    #[must_use]
    pub fn output_keys(&self) -> Vec<String> {
        self.planner.output_keys()
    }

    /// Hooks notified of this executor's lifecycle events.
    #[must_use]
    pub fn hooks(&self) -> Arc<dyn AgentHooks> {
        Arc::clone(&self.hooks)
    }

    /// Returns the executor's configuration.
    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Converts caller values to planner inputs; every value must be a string.
fn string_inputs(values: &Values) -> Result<Inputs, AgentError> {
    values
        .iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => Ok((key.clone(), s.clone())),
            _ => Err(AgentError::InputNotString { key: key.clone() }),
        })
        .collect()
}
