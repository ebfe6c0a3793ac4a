// src/exec/backend.rs

//! Pluggable agent backend abstraction.
//!
//! The orchestration loop talks to an `AgentBackend` instead of spawning
//! processes directly. This makes it easy to swap in a scripted fake in
//! tests while keeping the production implementation here.
//!
//! - `CliAgentBackend` is the default implementation: it spawns the
//!   configured CLI process for the requested backend kind and captures its
//!   output.
//! - Tests can provide their own `AgentBackend` that serves canned
//!   [`InvokeResult`]s and records prompts.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::ConfigFile;
use crate::exec::invocation::build_invocation;
use crate::types::BackendKind;

/// Uniform envelope returned by any backend invocation.
///
/// Failures are data, not errors: a failed invocation comes back with
/// `ok = false` and the failure text in `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeResult {
    pub ok: bool,
    /// Captured stdout.
    pub output: String,
    /// Captured stderr, or a synthesized failure description.
    pub error: String,
}

impl InvokeResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            ok: true,
            output: output.into(),
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            output: String::new(),
            error: error.into(),
        }
    }
}

/// Trait abstracting how a backend is invoked with a prompt.
///
/// All backends are treated uniformly through this contract regardless of
/// how each one is actually reached.
pub trait AgentBackend: Send + Sync {
    fn invoke(
        &self,
        backend: BackendKind,
        prompt: String,
    ) -> Pin<Box<dyn Future<Output = InvokeResult> + Send + '_>>;
}

/// Real backend used in production.
///
/// Spawns the configured CLI process for the requested kind, bounded by the
/// configured timeout. A timed-out child is killed and reported as a failed
/// invocation.
pub struct CliAgentBackend {
    config: ConfigFile,
    timeout: Duration,
}

impl CliAgentBackend {
    pub fn new(config: ConfigFile) -> Self {
        let timeout = Duration::from_secs(config.defaults().timeout_secs);
        Self { config, timeout }
    }

    async fn invoke_inner(&self, backend: BackendKind, prompt: String) -> InvokeResult {
        let spec = build_invocation(backend, self.config.command_for(backend), &prompt);

        debug!(
            backend = %backend,
            program = %spec.program,
            "invoking agent backend"
        );

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Per-invocation environment override, not ambient process state.
        for key in &spec.scrub_env {
            cmd.env_remove(key);
        }

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                return InvokeResult::failure(format!(
                    "spawning '{}' for backend {backend}: {err}",
                    spec.program
                ));
            }
        };

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                return InvokeResult::failure(format!(
                    "waiting for '{}' for backend {backend}: {err}",
                    spec.program
                ));
            }
            // The child future is dropped here; kill_on_drop reaps it.
            Err(_) => {
                warn!(
                    backend = %backend,
                    timeout_secs = self.timeout.as_secs(),
                    "backend invocation timed out"
                );
                return InvokeResult::failure(format!(
                    "timed out after {}s",
                    self.timeout.as_secs()
                ));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            InvokeResult {
                ok: true,
                output: stdout,
                error: stderr,
            }
        } else {
            let code = output.status.code().unwrap_or(-1);
            debug!(backend = %backend, exit_code = code, "backend process failed");
            InvokeResult {
                ok: false,
                output: stdout,
                error: if stderr.is_empty() {
                    format!("exit_code={code}")
                } else {
                    stderr
                },
            }
        }
    }
}

impl AgentBackend for CliAgentBackend {
    fn invoke(
        &self,
        backend: BackendKind,
        prompt: String,
    ) -> Pin<Box<dyn Future<Output = InvokeResult> + Send + '_>> {
        Box::pin(self.invoke_inner(backend, prompt))
    }
}
