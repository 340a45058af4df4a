//! Agent engine module with the plan/act/observe loop, per-run state and builder.

pub mod builder;
pub mod react_loop;
pub mod state;

pub use builder::ExecutorBuilder;
pub use react_loop::Executor;
pub use state::Phase;
