//! Marker and key constants shared by planners and the executor.
//!
//! The prompt templates and the output interpreter must agree on these
//! literals, so they are defined once here.

/// Markers the model writes into its completions.
pub mod markers {
    /// Finish marker of the zero-shot style.
    pub const FINAL_ANSWER: &str = "Final Answer:";

    /// Finish marker of the conversational style.
    pub const CONVERSATIONAL_FINAL_ANSWER: &str = "AI:";

    /// Prefix of an observation line in the scratchpad.
    pub const OBSERVATION: &str = "Observation: ";

    /// Continuation cue appended by the conversational scratchpad.
    pub const THOUGHT: &str = "Thought:";

    /// Stop sequences that keep the model from writing its own observations.
    pub const STOP_WORDS: [&str; 2] = ["\nObservation:", "\n\tObservation:"];

    /// Answer reported to hooks when the iteration budget runs out.
    pub const NOT_FINISHED: &str = "agent not finished before max iterations";
}

/// Regex patterns classifying action requests.
pub mod patterns {
    /// Zero-shot style: name up to the argument marker, argument to end of text.
    pub const ZERO_SHOT_ACTION: &str = r"Action:\s*(.+)\s*Action Input:\s*(?s:(.+))";

    /// Conversational style.
    pub const CONVERSATIONAL_ACTION: &str = r"Action: (.*?)[\n]*Action Input: (?s:(.*))";
}

/// Input and output keys.
pub mod keys {
    /// Default output key.
    pub const OUTPUT: &str = "output";

    /// Key under which the step history is returned.
    pub const INTERMEDIATE_STEPS: &str = "intermediateSteps";

    /// Prompt variable holding the scratchpad.
    pub const AGENT_SCRATCHPAD: &str = "agent_scratchpad";

    /// Prompt variable holding the current date.
    pub const TODAY: &str = "today";

    /// Prompt variables planners fill in themselves every round.
    pub const RESERVED: [&str; 2] = [AGENT_SCRATCHPAD, TODAY];

    /// Prompt variable holding the user's question.
    pub const INPUT: &str = "input";

    /// Prompt variable holding the capability names.
    pub const TOOL_NAMES: &str = "tool_names";

    /// Prompt variable holding the capability descriptions.
    pub const TOOL_DESCRIPTIONS: &str = "tool_descriptions";

    /// Prompt variable holding prior conversation.
    pub const HISTORY: &str = "history";
}

/// Defaults for executor configuration.
pub mod defaults {
    /// Default iteration budget.
    pub const MAX_ITERATIONS: u32 = 5;

    /// Default number of workers used by `apply`.
    pub const APPLY_MAX_WORKERS: usize = 5;
}
