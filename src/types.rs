use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// Execution backends the scheduler can dispatch a step to.
///
/// The set is fixed: every step resolves to exactly one of these, either
/// declared in the plan, forced by the caller, or inferred from the step's
/// descriptive text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Codex,
    Claude,
    Agent,
}

/// The designated fallback backend: when a step's primary backend fails, it
/// gets one retry here.
pub const RELIABLE_BACKEND: BackendKind = BackendKind::Codex;

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [BackendKind::Codex, BackendKind::Claude, BackendKind::Agent];

    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Codex => "codex",
            BackendKind::Claude => "claude",
            BackendKind::Agent => "agent",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "codex" => Ok(BackendKind::Codex),
            "claude" => Ok(BackendKind::Claude),
            "agent" => Ok(BackendKind::Agent),
            other => Err(format!(
                "invalid backend: {other} (expected \"codex\", \"claude\" or \"agent\")"
            )),
        }
    }
}

/// How a step may be scheduled relative to its siblings.
///
/// - `Sequential`: the step only ever runs alone.
/// - `Parallel`: the step may share a batch with other ready parallel steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "parallel" => Ok(ExecutionMode::Parallel),
            other => Err(format!(
                "invalid execution mode: {other} (expected \"sequential\" or \"parallel\")"
            )),
        }
    }
}

/// Terminal status of one completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Ok,
    Failed,
}

impl StepStatus {
    pub fn is_ok(self) -> bool {
        self == StepStatus::Ok
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StepStatus::Ok => "ok",
            StepStatus::Failed => "failed",
        })
    }
}

/// Caller-supplied backend override: `auto` keeps the plan's per-step
/// backends, any other value overrides every step unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ForcedBackend {
    #[default]
    Auto,
    Codex,
    Claude,
    Agent,
}

impl ForcedBackend {
    /// The concrete backend this forces, or `None` for `auto`.
    pub fn resolved(self) -> Option<BackendKind> {
        match self {
            ForcedBackend::Auto => None,
            ForcedBackend::Codex => Some(BackendKind::Codex),
            ForcedBackend::Claude => Some(BackendKind::Claude),
            ForcedBackend::Agent => Some(BackendKind::Agent),
        }
    }
}

/// Caller-supplied execution-mode override, analogous to [`ForcedBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ForcedMode {
    #[default]
    Auto,
    Sequential,
    Parallel,
}

impl ForcedMode {
    pub fn resolved(self) -> Option<ExecutionMode> {
        match self {
            ForcedMode::Auto => None,
            ForcedMode::Sequential => Some(ExecutionMode::Sequential),
            ForcedMode::Parallel => Some(ExecutionMode::Parallel),
        }
    }
}
