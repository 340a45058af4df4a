//! Chain surface: a uniform way to invoke an executor, run it on a single
//! string, or fan independent invocations out over a worker pool.

use crate::constants::defaults;
use crate::context::Context;
use crate::engine::Executor;
use crate::error::{AgentError, ContextError};
use crate::hooks::AgentHooks;
use crate::types::{Outcome, Values};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Something that maps named input values to an [`Outcome`].
#[async_trait]
pub trait Chain: Send + Sync {
    /// Invokes the chain.
    ///
    /// # Errors
    ///
    /// Returns whatever error the chain produced.
    async fn call(&self, ctx: &Context, values: &Values) -> Result<Outcome, AgentError>;

    /// Keys the caller must supply.
    fn input_keys(&self) -> Vec<String>;

    /// Keys of a successful outcome.
    fn output_keys(&self) -> Vec<String>;

    /// Hooks told when [`call`] enters and leaves the chain.
    fn hooks(&self) -> Option<Arc<dyn AgentHooks>> {
        None
    }
}

#[async_trait]
impl Chain for Executor {
    async fn call(&self, ctx: &Context, values: &Values) -> Result<Outcome, AgentError> {
        Executor::call(self, ctx, values).await
    }

    fn input_keys(&self) -> Vec<String> {
        Executor::input_keys(self)
    }

    fn output_keys(&self) -> Vec<String> {
        Executor::output_keys(self)
    }

    fn hooks(&self) -> Option<Arc<dyn AgentHooks>> {
        Some(Executor::hooks(self))
    }
}

/// Invokes `chain`, checking its declared input keys before the call and its
/// declared output keys after it.
///
/// The chain's hooks see the values on entry and then either the outcome or
/// the error.
///
/// # Errors
///
/// Returns [`AgentError::MissingInput`] or [`AgentError::MissingOutput`] for
/// an absent key, otherwise the chain's own error.
pub async fn call(ctx: &Context, chain: &dyn Chain, values: &Values) -> Result<Outcome, AgentError> {
    let hooks = chain.hooks();
    if let Some(hooks) = &hooks {
        hooks.chain_start(ctx, values);
    }

    let result = validated_call(ctx, chain, values).await;

    if let Some(hooks) = &hooks {
        match &result {
            Ok(outcome) => hooks.chain_end(ctx, outcome),
            Err(err) => hooks.chain_error(ctx, err),
        }
    }
    result
}

async fn validated_call(
    ctx: &Context,
    chain: &dyn Chain,
    values: &Values,
) -> Result<Outcome, AgentError> {
    if let Some(key) = chain
        .input_keys()
        .into_iter()
        .find(|key| !values.contains_key(key))
    {
        return Err(AgentError::MissingInput { key });
    }

    let outcome = chain.call(ctx, values).await?;

    if let Some(key) = chain
        .output_keys()
        .into_iter()
        .find(|key| outcome.output(key).is_none())
    {
        return Err(AgentError::MissingOutput { key });
    }
    Ok(outcome)
}

/// Runs a chain that takes exactly one input and returns exactly one output.
///
/// # Errors
///
/// - [`AgentError::MultipleInputs`] or [`AgentError::MultipleOutputs`] if the
///   chain does not have exactly one key on that side
/// - [`AgentError::MissingOutput`] if the outcome lacks the output key
/// - any error from the chain itself
pub async fn run(
    ctx: &Context,
    chain: &dyn Chain,
    input: impl Into<String> + Send,
) -> Result<String, AgentError> {
    let [input_key] = <[String; 1]>::try_from(chain.input_keys())
        .map_err(|_| AgentError::MultipleInputs)?;
    let output_keys = chain.output_keys();
    let [output_key] = output_keys.as_slice() else {
        return Err(AgentError::MultipleOutputs);
    };

    let values = Values::from([(input_key, serde_json::Value::String(input.into()))]);
    let outcome = call(ctx, chain, &values).await?;

    outcome
        .output(output_key)
        .map(ToString::to_string)
        .ok_or_else(|| AgentError::MissingOutput {
            key: output_key.clone(),
        })
}

/// Invokes `chain` once per entry of `inputs` on a pool of `max_workers`
/// tasks and returns the outcomes in input order.
///
/// A `max_workers` of zero uses the default pool size. Workers stop picking
/// up new work once `ctx` is done.
///
/// # Errors
///
/// Returns the first error any invocation reports, or
/// [`AgentError::Cancelled`] if `ctx` is done before every result arrived.
pub async fn apply(
    ctx: &Context,
    chain: Arc<dyn Chain>,
    inputs: Vec<Values>,
    max_workers: usize,
) -> Result<Vec<Outcome>, AgentError> {
    let total = inputs.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    let workers = if max_workers == 0 {
        defaults::APPLY_MAX_WORKERS
    } else {
        max_workers
    };

    let jobs = Arc::new(Mutex::new(inputs.into_iter().enumerate()));
    let (result_tx, mut result_rx) = mpsc::channel(total);

    // Dropping the set aborts whatever is still running on early return.
    let mut pool = JoinSet::new();
    for worker in 0..workers.min(total) {
        let jobs = Arc::clone(&jobs);
        let results = result_tx.clone();
        let chain = Arc::clone(&chain);
        let ctx = ctx.clone();
        pool.spawn(async move {
            while ctx.err().is_none() {
                let next = jobs.lock().next();
                let Some((index, values)) = next else {
                    break;
                };
                tracing::trace!(worker, index, "apply job started");
                let result = call(&ctx, chain.as_ref(), &values).await;
                if results.send((index, result)).await.is_err() {
                    break;
                }
            }
        });
    }
    drop(result_tx);

    let mut slots: Vec<Option<Outcome>> = std::iter::repeat_with(|| None).take(total).collect();
    for _ in 0..total {
        tokio::select! {
            err = ctx.done() => return Err(err.into()),
            received = result_rx.recv() => match received {
                Some((index, Ok(outcome))) => slots[index] = Some(outcome),
                Some((index, Err(err))) => {
                    tracing::debug!(index, error = %err, "apply job failed");
                    return Err(err);
                }
                None => break,
            },
        }
    }

    slots
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| AgentError::Cancelled(ctx.err().unwrap_or(ContextError::Cancelled)))
}
