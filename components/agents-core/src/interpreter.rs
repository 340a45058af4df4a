//! Classification of raw model completions.
//!
//! An [`OutputInterpreter`] maps completion text to exactly one of a finish,
//! a list of actions, or a parse failure. It holds no state beyond its
//! compiled pattern, so identical text always classifies identically.
//!
//! The finish marker is checked first and wins even when an action-shaped
//! substring appears earlier in the text. An action argument that itself
//! contains the finish marker is therefore classified as a finish.

use crate::constants::{keys, markers, patterns};
use crate::error::ParseError;
use crate::types::{Action, Decision, Finish};
use regex::Regex;
use std::sync::LazyLock;

static ZERO_SHOT_REGEX: LazyLock<Regex> = LazyLock::new(|| compile(patterns::ZERO_SHOT_ACTION));

static CONVERSATIONAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(patterns::CONVERSATIONAL_ACTION));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => panic!("action pattern should be valid at compile time: {e}"),
    }
}

/// Splits completion text into a finish or an action request.
#[derive(Debug, Clone)]
pub struct OutputInterpreter {
    finish_marker: String,
    action: Regex,
    output_key: String,
}

impl OutputInterpreter {
    /// Creates an interpreter from a finish marker and a two-group action regex.
    ///
    /// The first capture group is the capability name, the second the argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(
        finish_marker: impl Into<String>,
        action_pattern: &str,
        output_key: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            finish_marker: finish_marker.into(),
            action: Regex::new(action_pattern)?,
            output_key: output_key.into(),
        })
    }

    /// Interpreter for the zero-shot style (`Final Answer:`).
    #[must_use]
    pub fn zero_shot(output_key: impl Into<String>) -> Self {
        Self {
            finish_marker: markers::FINAL_ANSWER.to_string(),
            action: ZERO_SHOT_REGEX.clone(),
            output_key: output_key.into(),
        }
    }

    /// Interpreter for the conversational style (`AI:`).
    #[must_use]
    pub fn conversational(output_key: impl Into<String>) -> Self {
        Self {
            finish_marker: markers::CONVERSATIONAL_FINAL_ANSWER.to_string(),
            action: CONVERSATIONAL_REGEX.clone(),
            output_key: output_key.into(),
        }
    }

    /// The key the answer is stored under.
    #[must_use]
    pub fn output_key(&self) -> &str {
        &self.output_key
    }

    /// The finish marker.
    #[must_use]
    pub fn finish_marker(&self) -> &str {
        &self.finish_marker
    }

    /// Classifies `output`.
    ///
    /// The answer of a finish is everything after the last finish marker,
    /// untrimmed. Action name and argument are trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying `output` when neither form matches.
    pub fn interpret(&self, output: &str) -> Result<Decision, ParseError> {
        if let Some((_, answer)) = output.rsplit_once(self.finish_marker.as_str()) {
            return Ok(Decision::Finish(Finish::new(
                self.output_key.as_str(),
                answer,
                output,
            )));
        }

        let caps = self
            .action
            .captures(output)
            .ok_or_else(|| ParseError::new(output))?;

        let tool = caps.get(1).map_or("", |m| m.as_str()).trim();
        let tool_input = caps.get(2).map_or("", |m| m.as_str()).trim();

        Ok(Decision::action(Action::new(tool, tool_input, output)))
    }
}

impl Default for OutputInterpreter {
    fn default() -> Self {
        Self::zero_shot(keys::OUTPUT)
    }
}
