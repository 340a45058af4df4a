//! Shared test utilities for integration tests.
//!
//! Provides a scripted completion provider, capabilities that count their
//! calls, and hooks that record what they observe.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use stepwise_agents::{
    Action, AgentError, AgentHooks, Capability, CapabilityError, CompletionProvider, Context,
    Executor, ExecutorBuilder, ExecutorConfig, Finish, GenerationError, Outcome, PlannerOptions,
    StreamFn, Values, ZeroShotPlanner,
};

// =============================================================================
// Scripted provider
// =============================================================================

/// Completion provider replaying queued completions in FIFO order.
///
/// Once the queue is empty it keeps returning the fallback, or fails with
/// [`GenerationError::EmptyResponse`] when there is none.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    prompts: Mutex<Vec<String>>,
    stops: Mutex<Vec<Vec<String>>>,
}

impl ScriptedProvider {
    /// Replays `replies` once each.
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(ToString::to_string).collect()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
            stops: Mutex::new(Vec::new()),
        })
    }

    /// Returns `reply` forever.
    pub fn repeating(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
            stops: Mutex::new(Vec::new()),
        })
    }

    /// Every prompt received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Stop sequences of every call.
    pub fn stops(&self) -> Vec<Vec<String>> {
        self.stops.lock().clone()
    }

    /// Number of completions requested.
    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        ctx: &Context,
        prompt: &str,
        stop: &[String],
        stream: Option<&StreamFn>,
    ) -> Result<String, GenerationError> {
        self.prompts.lock().push(prompt.to_string());
        self.stops.lock().push(stop.to_vec());

        let next = self.replies.lock().pop_front();
        let reply = next
            .or_else(|| self.fallback.clone())
            .ok_or(GenerationError::EmptyResponse)?;

        if let Some(stream) = stream {
            stream(ctx, reply.as_bytes());
        }
        Ok(reply)
    }
}

/// Provider answering whatever question the zero-shot prompt asks.
pub struct EchoProvider;

#[async_trait]
impl CompletionProvider for EchoProvider {
    async fn complete(
        &self,
        _ctx: &Context,
        prompt: &str,
        _stop: &[String],
        _stream: Option<&StreamFn>,
    ) -> Result<String, GenerationError> {
        let question = prompt
            .lines()
            .filter_map(|line| line.strip_prefix("Question: "))
            .last()
            .ok_or_else(|| GenerationError::Api("no question in prompt".into()))?;
        Ok(format!("Final Answer: {}", question.to_uppercase()))
    }
}

// =============================================================================
// Capabilities
// =============================================================================

type Responder = Box<dyn Fn(usize, &str) -> Result<String, CapabilityError> + Send + Sync>;

/// Capability that records every input it receives.
pub struct CountingCapability {
    name: &'static str,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
    respond: Responder,
}

impl CountingCapability {
    /// Always answers `reply`.
    pub fn constant(name: &'static str, reply: &'static str) -> Arc<Self> {
        Self::with_responder(name, Box::new(move |_: usize, _: &str| Ok(reply.to_string())))
    }

    /// Answers `result-1`, `result-2`, ... in call order.
    pub fn numbered(name: &'static str) -> Arc<Self> {
        Self::with_responder(name, Box::new(|n: usize, _: &str| Ok(format!("result-{n}"))))
    }

    /// Always fails.
    pub fn failing(name: &'static str) -> Arc<Self> {
        Self::with_responder(
            name,
            Box::new(move |_: usize, input: &str| {
                Err(CapabilityError::InvalidInput {
                    tool: name.to_string(),
                    reason: format!("cannot handle '{input}'"),
                })
            }),
        )
    }

    fn with_responder(name: &'static str, respond: Responder) -> Arc<Self> {
        Arc::new(Self {
            name,
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
            respond,
        })
    }

    /// Number of calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Inputs received so far.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().clone()
    }
}

#[async_trait]
impl Capability for CountingCapability {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.name)
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Owned(format!("test capability {}", self.name))
    }

    async fn call(&self, _ctx: &Context, input: &str) -> Result<String, CapabilityError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.inputs.lock().push(input.to_string());
        (self.respond)(n, input)
    }
}

// =============================================================================
// Hooks
// =============================================================================

/// Hooks recording every notification.
#[derive(Default)]
pub struct RecordingHooks {
    /// Selected actions.
    pub actions: Mutex<Vec<Action>>,
    /// Produced finishes.
    pub finishes: Mutex<Vec<Finish>>,
    /// Streamed chunks.
    pub chunks: Mutex<Vec<Vec<u8>>>,
    /// Chain entry and exit events, rendered as `start`, `end:<outputs>` or `error:<message>`.
    pub chain_events: Mutex<Vec<String>>,
}

impl AgentHooks for RecordingHooks {
    fn chain_start(&self, _ctx: &Context, _values: &Values) {
        self.chain_events.lock().push("start".to_string());
    }

    fn chain_end(&self, _ctx: &Context, outcome: &Outcome) {
        let keys: Vec<&str> = outcome.values.keys().map(String::as_str).collect();
        self.chain_events.lock().push(format!("end:{}", keys.join(",")));
    }

    fn chain_error(&self, _ctx: &Context, err: &AgentError) {
        self.chain_events.lock().push(format!("error:{err}"));
    }

    fn agent_action(&self, _ctx: &Context, action: &Action) {
        self.actions.lock().push(action.clone());
    }

    fn agent_finish(&self, _ctx: &Context, finish: &Finish) {
        self.finishes.lock().push(finish.clone());
    }

    fn streaming_chunk(&self, _ctx: &Context, chunk: &[u8]) {
        self.chunks.lock().push(chunk.to_vec());
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Builds a zero-shot executor over `provider` and `capabilities`.
pub fn zero_shot_executor(
    provider: Arc<ScriptedProvider>,
    capabilities: Vec<Arc<dyn Capability>>,
    config: ExecutorConfig,
) -> anyhow::Result<Executor> {
    let planner = ZeroShotPlanner::from_provider(provider, capabilities, PlannerOptions::new());
    Ok(ExecutorBuilder::new(Arc::new(planner)).config(config).build()?)
}

/// Config with the given budget that returns the step history.
pub fn config_with_steps(max_iterations: u32) -> anyhow::Result<ExecutorConfig> {
    Ok(ExecutorConfig::builder()
        .max_iterations(max_iterations)
        .return_intermediate_steps(true)
        .build()?)
}

/// Caller values holding a single question.
pub fn question(text: &str) -> Values {
    Values::from([("input".to_string(), serde_json::json!(text))])
}
