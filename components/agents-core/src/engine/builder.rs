//! Executor builder pattern.

use crate::config::ExecutorConfig;
use crate::constants::keys;
use crate::engine::Executor;
use crate::error::AgentError;
use crate::hooks::{AgentHooks, NoopHooks};
use crate::planner::Planner;
use std::sync::Arc;

/// Builder for constructing executors.
pub struct ExecutorBuilder {
    planner: Arc<dyn Planner>,
    config: Option<ExecutorConfig>,
    hooks: Option<Arc<dyn AgentHooks>>,
}

impl ExecutorBuilder {
    /// Creates a builder around `planner`.
    #[must_use]
    pub fn new(planner: Arc<dyn Planner>) -> Self {
        Self {
            planner,
            config: None,
            hooks: None,
        }
    }

    /// Sets the configuration.
    ///
    /// Without one, the defaults are used with the planner's output key.
    #[must_use]
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the hooks notified of actions and finishes.
    #[must_use]
    pub fn hooks(mut self, hooks: Arc<dyn AgentHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Builds the executor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or names an output
    /// key the planner does not produce.
    pub fn build(self) -> Result<Executor, AgentError> {
        let config = match self.config {
            Some(config) => config,
            None => ExecutorConfig {
                output_key: self
                    .planner
                    .output_keys()
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| keys::OUTPUT.to_string()),
                ..ExecutorConfig::default()
            },
        };
        let hooks = self.hooks.unwrap_or_else(|| Arc::new(NoopHooks));

        Executor::with_hooks(self.planner, config, hooks)
    }
}

impl std::fmt::Debug for ExecutorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorBuilder")
            .field("config", &self.config)
            .field("hooks", &self.hooks.is_some())
            .finish_non_exhaustive()
    }
}
