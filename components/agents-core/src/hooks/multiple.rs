//! Fan-out over several hook implementations.

use crate::context::Context;
use crate::error::AgentError;
use crate::hooks::AgentHooks;
use crate::types::{Action, Finish, Outcome, Values};
use std::sync::Arc;

/// Forwards every event to each hook in list order.
#[derive(Clone, Default)]
pub struct MultiHooks {
    list: Vec<Arc<dyn AgentHooks>>,
}

impl MultiHooks {
    /// Creates an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook.
    #[must_use]
    pub fn with(mut self, hooks: Arc<dyn AgentHooks>) -> Self {
        self.list.push(hooks);
        self
    }
}

impl std::fmt::Debug for MultiHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiHooks")
            .field("len", &self.list.len())
            .finish()
    }
}

impl From<Vec<Arc<dyn AgentHooks>>> for MultiHooks {
    fn from(list: Vec<Arc<dyn AgentHooks>>) -> Self {
        Self { list }
    }
}

impl AgentHooks for MultiHooks {
    fn chain_start(&self, ctx: &Context, values: &Values) {
        for h in &self.list {
            h.chain_start(ctx, values);
        }
    }

    fn chain_end(&self, ctx: &Context, outcome: &Outcome) {
        for h in &self.list {
            h.chain_end(ctx, outcome);
        }
    }

    fn chain_error(&self, ctx: &Context, err: &AgentError) {
        for h in &self.list {
            h.chain_error(ctx, err);
        }
    }

    fn agent_action(&self, ctx: &Context, action: &Action) {
        for h in &self.list {
            h.agent_action(ctx, action);
        }
    }

    fn agent_finish(&self, ctx: &Context, finish: &Finish) {
        for h in &self.list {
            h.agent_finish(ctx, finish);
        }
    }

    fn streaming_chunk(&self, ctx: &Context, chunk: &[u8]) {
        for h in &self.list {
            h.streaming_chunk(ctx, chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
        label: &'static str,
    }

    impl AgentHooks for Recorder {
        fn agent_action(&self, _ctx: &Context, action: &Action) {
            self.events.lock().push(format!("{}:{}", self.label, action.tool));
        }

        fn chain_start(&self, _ctx: &Context, _values: &Values) {
            self.events.lock().push(format!("{}:start", self.label));
        }

        fn chain_end(&self, _ctx: &Context, _outcome: &Outcome) {
            self.events.lock().push(format!("{}:end", self.label));
        }

        fn chain_error(&self, _ctx: &Context, err: &AgentError) {
            self.events.lock().push(format!("{}:error:{err}", self.label));
        }
    }

    #[test]
    fn test_forwards_in_order() {
        let a = Arc::new(Recorder {
            label: "a",
            ..Default::default()
        });
        let b = Arc::new(Recorder {
            label: "b",
            ..Default::default()
        });
        let multi = MultiHooks::new()
            .with(Arc::clone(&a) as Arc<dyn AgentHooks>)
            .with(Arc::clone(&b) as Arc<dyn AgentHooks>);

        multi.agent_action(&Context::new(), &Action::new("Search", "q", "log"));

        assert_eq!(*a.events.lock(), vec!["a:Search".to_string()]);
        assert_eq!(*b.events.lock(), vec!["b:Search".to_string()]);
    }

    #[test]
    fn test_forwards_chain_events() {
        let a = Arc::new(Recorder {
            label: "a",
            ..Default::default()
        });
        let b = Arc::new(Recorder {
            label: "b",
            ..Default::default()
        });
        let multi = MultiHooks::from(vec![
            Arc::clone(&a) as Arc<dyn AgentHooks>,
            Arc::clone(&b) as Arc<dyn AgentHooks>,
        ]);
        let ctx = Context::new();

        multi.chain_start(&ctx, &Values::new());
        multi.chain_end(&ctx, &Outcome::default());
        multi.chain_error(&ctx, &AgentError::NoDecision);

        let expected = |label: &str| {
            vec![
                format!("{label}:start"),
                format!("{label}:end"),
                format!("{label}:error:no actions or finish was returned by the agent"),
            ]
        };
        assert_eq!(*a.events.lock(), expected("a"));
        assert_eq!(*b.events.lock(), expected("b"));
    }
}
