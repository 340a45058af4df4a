//! Observability hooks.
//!
//! Hooks are a best-effort side channel: they see chain entry and exit,
//! every selected action, every finish and every streamed chunk, but they
//! return nothing and can never change the course of a run.

pub mod multiple;
pub mod logging;
pub mod writer;

use crate::context::Context;
use crate::error::AgentError;
use crate::types::{Action, Finish, Outcome, Values};

/// Lifecycle notifications emitted by planners, the executor and
/// [`chain::call`](crate::chain::call).
pub trait AgentHooks: Send + Sync {
    /// A chain invocation is starting with the caller's values.
    fn chain_start(&self, _ctx: &Context, _values: &Values) {}

    /// A chain invocation returned a validated outcome.
    fn chain_end(&self, _ctx: &Context, _outcome: &Outcome) {}

    /// A chain invocation failed.
    fn chain_error(&self, _ctx: &Context, _err: &AgentError) {}

    /// An action was selected and is about to be dispatched.
    fn agent_action(&self, _ctx: &Context, _action: &Action) {}

    /// The agent produced a finish, or ran out of iterations.
    fn agent_finish(&self, _ctx: &Context, _finish: &Finish) {}

    /// The generation pipeline streamed a chunk of output.
    fn streaming_chunk(&self, _ctx: &Context, _chunk: &[u8]) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl AgentHooks for NoopHooks {}

pub use multiple::MultiHooks;
pub use logging::TracingHooks;
pub use writer::WriterHooks;

fn remove_new_lines(s: &str) -> String {
    s.replace('\n', " ")
}

/// Renders caller values as `"key": "value"` pairs in key order.
fn format_values(values: &Values) -> String {
    let mut pairs: Vec<(&String, String)> = values
        .iter()
        .map(|(k, v)| {
            let text = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k, text)
        })
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
        .into_iter()
        .map(|(k, v)| format!("\"{}\": \"{}\"", remove_new_lines(k), remove_new_lines(&v)))
        .collect::<Vec<_>>()
        .join(", ")
}
