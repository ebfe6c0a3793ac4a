// src/exec/step_runner.rs

//! Individual step execution with single-shot fallback.

use tracing::{info, warn};

use crate::engine::CompletedStep;
use crate::exec::backend::{AgentBackend, InvokeResult};
use crate::exec::prompt::step_prompt;
use crate::plan::Step;
use crate::types::{StepStatus, RELIABLE_BACKEND};

/// Execute one step: a primary invocation on the step's backend, plus at
/// most one retry on the reliable backend with the same prompt when the
/// primary fails on a non-reliable backend.
///
/// The step is always terminal after this returns: `ok` or `failed`, never
/// retried again.
pub async fn run_step<B: AgentBackend + ?Sized>(
    backend: &B,
    task: &str,
    step: &Step,
    completed: &[CompletedStep],
) -> CompletedStep {
    let prompt = step_prompt(task, step, completed);

    info!(step = %step.id, backend = %step.backend, "dispatching step");
    let primary = backend.invoke(step.backend, prompt.clone()).await;

    let mut backend_used = step.backend;
    let mut status = if primary.ok {
        StepStatus::Ok
    } else {
        StepStatus::Failed
    };
    let mut output = best_output(&primary);

    if !primary.ok && step.backend != RELIABLE_BACKEND {
        warn!(
            step = %step.id,
            backend = %step.backend,
            fallback = %RELIABLE_BACKEND,
            "primary backend failed; retrying on the reliable backend"
        );

        let fallback = backend.invoke(RELIABLE_BACKEND, prompt).await;
        if fallback.ok && !fallback.output.trim().is_empty() {
            backend_used = RELIABLE_BACKEND;
            status = StepStatus::Ok;
            output = fallback.output.trim().to_string();
        } else {
            output = format!(
                "{output}\n\n[fallback_{RELIABLE_BACKEND}_error]\n{}",
                best_error(&fallback)
            );
        }
    }

    info!(step = %step.id, backend = %backend_used, status = %status, "step finished");

    CompletedStep {
        id: step.id.clone(),
        title: step.title.clone(),
        backend_used,
        status,
        output,
    }
}

/// stdout, or stderr when stdout is empty.
fn best_output(result: &InvokeResult) -> String {
    let output = result.output.trim();
    if output.is_empty() {
        result.error.trim().to_string()
    } else {
        output.to_string()
    }
}

/// stderr, or stdout when stderr is empty.
fn best_error(result: &InvokeResult) -> String {
    let error = result.error.trim();
    if error.is_empty() {
        result.output.trim().to_string()
    } else {
        error.to_string()
    }
}
