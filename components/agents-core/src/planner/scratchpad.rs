//! Scratchpad construction.
//!
//! The scratchpad is the only continuity the model has between rounds: the
//! full step history is re-rendered every round, in order. Each style's
//! layout must match what its prompt template expects to read back.

use crate::constants::markers;
use crate::types::Step;

/// Zero-shot layout: every step is preceded and followed by a newline.
#[must_use]
pub fn zero_shot(steps: &[Step]) -> String {
    let mut pad = String::new();
    for step in steps {
        pad.push('\n');
        pad.push_str(&step.action.log);
        pad.push('\n');
        pad.push_str(markers::OBSERVATION);
        pad.push_str(&step.observation);
        pad.push('\n');
    }
    pad
}

/// Conversational layout: steps are concatenated and a trailing `Thought:`
/// cue is added when there is at least one step.
#[must_use]
pub fn conversational(steps: &[Step]) -> String {
    let mut pad = String::new();
    if steps.is_empty() {
        return pad;
    }
    for step in steps {
        pad.push_str(&step.action.log);
        pad.push('\n');
        pad.push_str(markers::OBSERVATION);
        pad.push_str(&step.observation);
    }
    pad.push('\n');
    pad.push_str(markers::THOUGHT);
    pad
}
