// src/engine/mod.rs

//! Orchestration engine for agentdag.
//!
//! This module ties together:
//! - the plan produced by the planning backend
//! - the pure batch-selection logic in [`crate::sched`]
//! - the execution layer in [`crate::exec`]
//!
//! The loop semantics live in [`runtime`]: Plan exactly once, then strict
//! (Pick, Run) alternation until a terminal status. All abnormal conditions
//! are encoded as status + log lines on [`RunState`]; nothing inside the
//! loop raises an error.

use std::fmt;

use crate::plan::{Plan, Step, StepId};
use crate::types::{BackendKind, ExecutionMode, StepStatus};

pub mod runtime;

pub use runtime::Orchestrator;

/// Status driving the orchestration state machine.
///
/// `Done` and `Error` are absorbing: no state is revisited after either is
/// assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Planning,
    Running,
    Done,
    Error,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Done | RunStatus::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Planning => "planning",
            RunStatus::Running => "running",
            RunStatus::Done => "done",
            RunStatus::Error => "error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal record of one executed step.
///
/// `backend_used` may differ from the step's declared backend when the
/// fallback kicked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedStep {
    pub id: StepId,
    pub title: String,
    pub backend_used: BackendKind,
    pub status: StepStatus,
    pub output: String,
}

impl CompletedStep {
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// Caller controls threaded into a run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub forced_backend: Option<BackendKind>,
    pub forced_mode: Option<ExecutionMode>,
    /// Hard cap on Pick/Run cycles (not on total steps).
    pub max_iterations: u32,
}

/// Mutable state of one orchestration invocation.
///
/// Created once per run, driven through the Plan/Pick/Run alternation, and
/// discarded after a terminal status. `completed` and `log` are append-only.
#[derive(Debug, Clone)]
pub struct RunState {
    /// The original high-level instruction.
    pub task: String,
    pub plan: Plan,
    /// Batch chosen for the current iteration.
    pub active: Vec<Step>,
    /// One entry per executed step, keyed by step id, grows monotonically.
    pub completed: Vec<CompletedStep>,
    pub status: RunStatus,
    /// Count of Run invocations so far.
    pub iteration: u32,
    pub max_iterations: u32,
    /// Append-only human-readable trace, mirrored to `tracing`.
    pub log: Vec<String>,
}

impl RunState {
    pub fn new(task: impl Into<String>, max_iterations: u32) -> Self {
        Self {
            task: task.into(),
            plan: Plan::default(),
            active: Vec::new(),
            completed: Vec::new(),
            status: RunStatus::Planning,
            iteration: 0,
            max_iterations,
            log: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Done
    }

    /// Append a trace line and mirror it to the log output.
    pub(crate) fn note(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!("{line}");
        self.log.push(line);
    }
}
