//! Hooks that print human-readable lines to a writer.

use crate::context::Context;
use crate::error::AgentError;
use crate::hooks::{AgentHooks, format_values, remove_new_lines};
use crate::types::{Action, Finish, Outcome, Values};
use parking_lot::Mutex;
use std::io::Write;

/// Writes one line per event. Write failures are ignored.
#[derive(Debug)]
pub struct WriterHooks<W> {
    writer: Mutex<W>,
    stream_chunks: bool,
}

impl<W: Write + Send> WriterHooks<W> {
    /// Creates hooks writing lifecycle events to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            stream_chunks: false,
        }
    }

    /// Also writes streamed chunks, verbatim and without separators.
    #[must_use]
    pub fn with_stream(mut self) -> Self {
        self.stream_chunks = true;
        self
    }

    /// Consumes the hooks and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> AgentHooks for WriterHooks<W> {
    fn chain_start(&self, _ctx: &Context, values: &Values) {
        let mut w = self.writer.lock();
        let _ = writeln!(w, "Entering chain with inputs: {}", format_values(values));
    }

    fn chain_end(&self, _ctx: &Context, outcome: &Outcome) {
        let mut w = self.writer.lock();
        let values = outcome
            .values
            .iter()
            .map(|(k, v)| format!("\"{}\": \"{}\"", remove_new_lines(k), remove_new_lines(v)))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(w, "Exiting chain with outputs: {values}");
    }

    fn chain_error(&self, _ctx: &Context, err: &AgentError) {
        let mut w = self.writer.lock();
        let _ = writeln!(
            w,
            "Exiting chain with error: {}",
            remove_new_lines(&err.to_string())
        );
    }

    fn agent_action(&self, _ctx: &Context, action: &Action) {
        let mut w = self.writer.lock();
        let _ = writeln!(
            w,
            "Agent selected action: \"{}\" with input \"{}\"",
            remove_new_lines(&action.tool),
            remove_new_lines(&action.tool_input)
        );
    }

    fn agent_finish(&self, _ctx: &Context, finish: &Finish) {
        let mut w = self.writer.lock();
        let values = finish
            .return_values
            .iter()
            .map(|(k, v)| format!("\"{}\": \"{}\"", remove_new_lines(k), remove_new_lines(v)))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(w, "Agent finish: {values}");
    }

    fn streaming_chunk(&self, _ctx: &Context, chunk: &[u8]) {
        if self.stream_chunks {
            let mut w = self.writer.lock();
            let _ = w.write_all(chunk);
            let _ = w.flush();
        }
    }
}
