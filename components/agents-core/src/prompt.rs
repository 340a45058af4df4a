//! Prompt templates for the two agent styles.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` produce literal braces.
//! Partial variables are bound when the template is built (capability names
//! and descriptions) and filled in before the caller's inputs.

use crate::capability::Capability;
use crate::capability::registry::{tool_descriptions, tool_names};
use crate::constants::keys;
use crate::error::TemplateError;
use std::collections::HashMap;
use std::sync::Arc;

/// Prefix of the zero-shot prompt.
pub const ZERO_SHOT_PREFIX: &str = "Today is {today}.
Answer the following questions as best you can. You have access to the following tools:

{tool_descriptions}";

/// Format instructions of the zero-shot prompt.
pub const ZERO_SHOT_FORMAT_INSTRUCTIONS: &str = "Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [ {tool_names} ]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question";

/// Suffix of the zero-shot prompt.
pub const ZERO_SHOT_SUFFIX: &str = "Begin!

Question: {input}
{agent_scratchpad}";

/// Prefix of the conversational prompt.
pub const CONVERSATIONAL_PREFIX: &str = "Assistant is a large language model.

Assistant is designed to be able to assist with a wide range of tasks, from answering simple questions to providing in-depth explanations and discussions on a wide range of topics. Assistant is able to generate human-like text based on the input it receives, allowing it to engage in natural-sounding conversations and provide responses that are coherent and relevant to the topic at hand.

TOOLS:
------

Assistant has access to the following tools:

{tool_descriptions}";

/// Format instructions of the conversational prompt.
pub const CONVERSATIONAL_FORMAT_INSTRUCTIONS: &str = "To use a tool, please use the following format:

Thought: Do I need to use a tool? Yes
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action

When you have a response to say to the Human, or if you do not need to use a tool, you MUST use the format:

Thought: Do I need to use a tool? No
AI: [your response here]";

/// Suffix of the conversational prompt.
pub const CONVERSATIONAL_SUFFIX: &str = "Begin!

Previous conversation history:
{history}

New input: {input}

Thought:{agent_scratchpad}";

/// A text template with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    input_variables: Vec<String>,
    partial_variables: HashMap<String, String>,
}

impl PromptTemplate {
    /// Creates a template declaring the variables callers must supply.
    pub fn new(template: impl Into<String>, input_variables: Vec<String>) -> Self {
        Self {
            template: template.into(),
            input_variables,
            partial_variables: HashMap::new(),
        }
    }

    /// Binds a variable at construction time.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::ReservedVariable`] for `agent_scratchpad` and
    /// `today`, which planners fill in on every round.
    pub fn with_partial(
        self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let key = key.into();
        if keys::RESERVED.contains(&key.as_str()) {
            return Err(TemplateError::ReservedVariable(key));
        }
        Ok(self.bind(key, value))
    }

    fn bind(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.partial_variables.insert(key.into(), value.into());
        self
    }

    /// Variables callers must supply.
    #[must_use]
    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    /// The raw template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders the template. Caller values override partials of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder has no value or a brace is unbalanced.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.template.len());
        let mut chars = self.template.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    out.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(TemplateError::Malformed {
                            position: pos,
                            reason: "unclosed '{'",
                        });
                    }
                    let value = values
                        .get(&name)
                        .or_else(|| self.partial_variables.get(&name))
                        .ok_or_else(|| TemplateError::MissingVariable(name.clone()))?;
                    out.push_str(value);
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    out.push('}');
                }
                '}' => {
                    return Err(TemplateError::Malformed {
                        position: pos,
                        reason: "unmatched '}'",
                    });
                }
                _ => out.push(c),
            }
        }

        Ok(out)
    }
}

/// Builds the default prompts for each agent style.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Zero-shot prompt from prefix, format instructions and suffix.
    #[must_use]
    pub fn zero_shot(
        capabilities: &[Arc<dyn Capability>],
        prefix: &str,
        format_instructions: &str,
        suffix: &str,
    ) -> PromptTemplate {
        let template = [prefix, format_instructions, suffix].join("\n\n");
        PromptTemplate::new(
            template,
            vec![
                keys::INPUT.to_string(),
                keys::AGENT_SCRATCHPAD.to_string(),
                keys::TODAY.to_string(),
            ],
        )
        .bind(keys::TOOL_NAMES, tool_names(capabilities))
        .bind(keys::TOOL_DESCRIPTIONS, tool_descriptions(capabilities))
    }

    /// Conversational prompt from prefix, format instructions and suffix.
    #[must_use]
    pub fn conversational(
        capabilities: &[Arc<dyn Capability>],
        prefix: &str,
        format_instructions: &str,
        suffix: &str,
    ) -> PromptTemplate {
        let template = [prefix, format_instructions, suffix].join("\n\n");
        PromptTemplate::new(
            template,
            vec![keys::INPUT.to_string(), keys::AGENT_SCRATCHPAD.to_string()],
        )
        .bind(keys::TOOL_NAMES, tool_names(capabilities))
        .bind(keys::TOOL_DESCRIPTIONS, tool_descriptions(capabilities))
        .bind(keys::HISTORY, "")
    }
}
