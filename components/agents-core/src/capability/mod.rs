//! Capabilities: named units of side-effecting behavior the agent can invoke.

pub mod registry;

use crate::context::Context;
use crate::error::CapabilityError;
use async_trait::async_trait;
use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;

/// Trait for capabilities that can be invoked by agents.
///
/// Implementations must be reentrant: several executor invocations may call
/// the same capability concurrently. Synchronizing any shared state is the
/// implementation's job.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Returns the name the model uses to select this capability.
    fn name(&self) -> Cow<'static, str>;

    /// Returns a one-line description rendered into the prompt.
    fn description(&self) -> Cow<'static, str>;

    /// Invokes the capability with the model's argument text.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the enclosing executor invocation.
    async fn call(&self, ctx: &Context, input: &str) -> Result<String, CapabilityError>;
}

type BoxedCall = Box<
    dyn Fn(Context, String) -> Pin<Box<dyn Future<Output = Result<String, CapabilityError>> + Send>>
        + Send
        + Sync,
>;

/// A capability backed by an async closure.
///
/// The closure is dropped mid-flight with [`CapabilityError::Interrupted`]
/// once the caller's context is done.
pub struct FnCapability {
    name: Cow<'static, str>,
    description: Cow<'static, str>,
    call: BoxedCall,
}

impl FnCapability {
    /// Creates a capability from a name, a description and an async closure.
    pub fn new<F, Fut>(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        f: F,
    ) -> Self
    where
        F: Fn(Context, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, CapabilityError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            call: Box::new(move |ctx, input| Box::pin(f(ctx, input))),
        }
    }
}

impl std::fmt::Debug for FnCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCapability")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Capability for FnCapability {
    fn name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    fn description(&self) -> Cow<'static, str> {
        self.description.clone()
    }

    async fn call(&self, ctx: &Context, input: &str) -> Result<String, CapabilityError> {
        let run = (self.call)(ctx.clone(), input.to_string());
        tokio::select! {
            source = ctx.done() => Err(CapabilityError::Interrupted {
                tool: self.name.to_string(),
                source,
            }),
            result = run => result,
        }
    }
}

pub use registry::CapabilityTable;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContextError;

    #[tokio::test]
    async fn test_fn_capability_call() {
        let echo = FnCapability::new("echo", "Repeats its input", |_ctx, input| async move {
            Ok(format!("echo: {input}"))
        });

        assert_eq!(echo.name(), "echo");
        assert_eq!(echo.description(), "Repeats its input");
        let out = echo.call(&Context::new(), "hi").await.unwrap();
        assert_eq!(out, "echo: hi");
    }

    #[tokio::test]
    async fn test_fn_capability_error() {
        let broken = FnCapability::new("broken", "Always fails", |_ctx, _input| async move {
            Err(CapabilityError::execution("broken", "no backend"))
        });

        let err = broken.call(&Context::new(), "x").await.unwrap_err();
        assert!(matches!(err, CapabilityError::ExecutionFailed { .. }));
    }

    #[tokio::test]
    async fn test_fn_capability_interrupted_by_cancel() {
        let slow = FnCapability::new("slow", "Never returns in time", |_ctx, _input| async move {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            Ok(String::new())
        });
        let ctx = Context::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let err = slow.call(&ctx, "x").await.unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::Interrupted { ref tool, source: ContextError::Cancelled } if tool == "slow"
        ));
    }
}
