//! Core types for agent operations.

use crate::constants::keys;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Named string inputs handed to planners and generation pipelines.
pub type Inputs = HashMap<String, String>;

/// Untyped caller inputs, validated into [`Inputs`] by the executor.
pub type Values = HashMap<String, serde_json::Value>;

/// A request to invoke a capability, parsed from model output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Capability name as written by the model.
    pub tool: String,
    /// Argument text handed to the capability.
    pub tool_input: String,
    /// Raw completion text the action was parsed from.
    pub log: String,
    /// Optional correlation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<String>,
}

impl Action {
    /// Creates an action without a correlation identifier.
    pub fn new(
        tool: impl Into<String>,
        tool_input: impl Into<String>,
        log: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            tool_input: tool_input.into(),
            log: log.into(),
            tool_id: None,
        }
    }

    /// Sets the correlation identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.tool_id = Some(id.into());
        self
    }

    /// Returns `true` for the placeholder action of a parse-recovery step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tool.is_empty() && self.tool_input.is_empty() && self.log.is_empty()
    }
}

/// One completed round: the action taken and what it produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// The action that was taken.
    pub action: Action,
    /// Capability result or synthetic feedback text.
    pub observation: String,
}

impl Step {
    /// Creates a step.
    pub fn new(action: Action, observation: impl Into<String>) -> Self {
        Self {
            action,
            observation: observation.into(),
        }
    }
}

/// The terminal signal carrying the agent's answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finish {
    /// Named output values; contains the configured output key.
    pub return_values: BTreeMap<String, String>,
    /// Raw completion text the finish was parsed from.
    pub log: String,
}

impl Finish {
    /// Creates a finish holding a single output value.
    pub fn new(
        output_key: impl Into<String>,
        answer: impl Into<String>,
        log: impl Into<String>,
    ) -> Self {
        let mut return_values = BTreeMap::new();
        return_values.insert(output_key.into(), answer.into());
        Self {
            return_values,
            log: log.into(),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.return_values.get(key).map(String::as_str)
    }
}

/// What a planner decided for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Invoke these capabilities in order.
    Actions(Vec<Action>),
    /// Stop and return an answer.
    Finish(Finish),
}

impl Decision {
    /// Convenience constructor for a single action.
    #[must_use]
    pub fn action(action: Action) -> Self {
        Self::Actions(vec![action])
    }
}

/// Result of an executor invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Output values keyed by output key.
    pub values: BTreeMap<String, String>,
    /// Ordered step history, present when the executor is configured to return it.
    #[serde(
        rename = "intermediateSteps",
        skip_serializing_if = "Option::is_none"
    )]
    pub intermediate_steps: Option<Vec<Step>>,
}

impl Outcome {
    /// Returns the value stored under `key`.
    #[must_use]
    pub fn output(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the recorded steps, or an empty slice when none were requested.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        self.intermediate_steps.as_deref().unwrap_or_default()
    }

    /// Renders the outcome as a flat JSON object.
    ///
    /// Output values sit at the top level; the step history, when present,
    /// sits under the `intermediateSteps` key.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.values {
            map.insert(key.clone(), serde_json::Value::String(value.clone()));
        }
        if let Some(steps) = &self.intermediate_steps {
            map.insert(
                keys::INTERMEDIATE_STEPS.to_string(),
                serde_json::to_value(steps).unwrap_or(serde_json::Value::Null),
            );
        }
        serde_json::Value::Object(map)
    }
}
