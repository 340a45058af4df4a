//! Hooks that emit `tracing` events.

use crate::context::Context;
use crate::error::AgentError;
use crate::hooks::{AgentHooks, format_values, remove_new_lines};
use crate::types::{Action, Finish, Outcome, Values};

/// Logs lifecycle events at `info`, chain failures at `warn` and streamed
/// chunks at `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl AgentHooks for TracingHooks {
    fn chain_start(&self, _ctx: &Context, values: &Values) {
        tracing::info!(inputs = %format_values(values), "entering chain");
    }

    fn chain_end(&self, _ctx: &Context, outcome: &Outcome) {
        tracing::info!(
            outputs = ?outcome.values,
            steps = outcome.steps().len(),
            "exiting chain"
        );
    }

    fn chain_error(&self, _ctx: &Context, err: &AgentError) {
        tracing::warn!(error = %err, "exiting chain with error");
    }

    fn agent_action(&self, _ctx: &Context, action: &Action) {
        tracing::info!(
            tool = %action.tool,
            tool_input = %remove_new_lines(&action.tool_input),
            tool_id = action.tool_id.as_deref().unwrap_or(""),
            "agent selected action"
        );
    }

    fn agent_finish(&self, _ctx: &Context, finish: &Finish) {
        tracing::info!(values = ?finish.return_values, "agent finished");
    }

    fn streaming_chunk(&self, _ctx: &Context, chunk: &[u8]) {
        tracing::trace!(chunk = %String::from_utf8_lossy(chunk), "streamed chunk");
    }
}
