// src/engine/runtime.rs

//! The Plan / Pick / Run orchestration loop.

use std::mem;
use std::sync::Arc;

use tracing::info;

use crate::engine::{RunOptions, RunState, RunStatus};
use crate::exec::backend::AgentBackend;
use crate::exec::batch::run_batch;
use crate::plan::planner::produce_plan;
use crate::sched::{pick_batch, PickDecision};

/// Drives one task from plan to terminal status.
///
/// Plans exactly once, then alternates Pick and Run until a terminal status
/// is assigned. Every abnormal condition (deadlock, failed steps, iteration
/// cap) lands in `RunState.status` and `RunState.log`; `run` itself never
/// fails.
pub struct Orchestrator<B: AgentBackend> {
    backend: Arc<B>,
    options: RunOptions,
}

impl<B: AgentBackend + 'static> Orchestrator<B> {
    pub fn new(backend: Arc<B>, options: RunOptions) -> Self {
        Self { backend, options }
    }

    pub async fn run(&self, task: &str) -> RunState {
        let mut state = RunState::new(task, self.options.max_iterations);

        state.plan = produce_plan(
            self.backend.as_ref(),
            task,
            self.options.forced_backend,
            self.options.forced_mode,
        )
        .await;
        state.note(format!("[plan] generated {} steps", state.plan.len()));
        state.status = RunStatus::Running;

        loop {
            match pick_batch(&state.plan, &state.completed) {
                PickDecision::Dispatch(batch) => {
                    let ids: Vec<&str> = batch.iter().map(|s| s.id.as_str()).collect();
                    state.note(format!("[pick] active={}", ids.join(",")));
                    state.active = batch;
                }
                PickDecision::Done => {
                    state.status = RunStatus::Done;
                    state.note("[pick] all steps completed");
                    break;
                }
                PickDecision::Failed => {
                    state.status = RunStatus::Error;
                    state.note("[pick] completed with failed steps");
                    break;
                }
                PickDecision::Deadlock => {
                    state.status = RunStatus::Error;
                    state.note("[pick] dependency deadlock");
                    break;
                }
            }

            if state.active.is_empty() {
                state.status = RunStatus::Error;
                state.note("[run] no active steps");
                break;
            }
            if state.iteration >= state.max_iterations {
                state.status = RunStatus::Error;
                state.note("[run] max iterations reached");
                break;
            }

            let batch = mem::take(&mut state.active);
            let results = run_batch(
                Arc::clone(&self.backend),
                &state.task,
                &batch,
                &state.completed,
            )
            .await;

            for result in &results {
                state.note(format!(
                    "[done] {} status={} backend={}",
                    result.id, result.status, result.backend_used
                ));
            }
            state.completed.extend(results);
            state.iteration += 1;
        }

        info!(
            status = %state.status,
            iterations = state.iteration,
            completed = state.completed.len(),
            "orchestration finished"
        );
        state
    }
}
