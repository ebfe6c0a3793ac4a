// src/exec/mod.rs

//! Backend invocation layer.
//!
//! This module is responsible for actually running steps against the CLI
//! agent backends and reporting uniform [`InvokeResult`]s back to the
//! orchestration loop.
//!
//! - [`backend`] provides the `AgentBackend` trait plus the concrete
//!   `CliAgentBackend` used in production; tests can replace it with a
//!   scripted fake.
//! - [`invocation`] builds the per-backend command line and environment
//!   scrubbing.
//! - [`prompt`] renders the per-step prompt with a bounded context window.
//! - [`step_runner`] executes one step, including the single fallback to
//!   the reliable backend.
//! - [`batch`] executes a whole batch, concurrently when it has more than
//!   one step.

pub mod backend;
pub mod batch;
pub mod invocation;
pub mod prompt;
pub mod step_runner;

pub use backend::{AgentBackend, CliAgentBackend, InvokeResult};
pub use batch::run_batch;
pub use step_runner::run_step;
