// src/sched/pick.rs

//! Pure batch-selection logic (the Pick node).

use std::collections::HashSet;

use crate::engine::CompletedStep;
use crate::plan::{Plan, Step};
use crate::types::ExecutionMode;

/// Decision for the next iteration of the orchestration loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickDecision {
    /// Dispatch these steps as one batch.
    Dispatch(Vec<Step>),
    /// Every step completed and all of them succeeded.
    Done,
    /// Every step completed but at least one failed.
    Failed,
    /// Pending steps remain but none have all dependencies completed.
    Deadlock,
}

/// Compute the next batch to execute, or declare the run finished/failed.
///
/// - `pending` = plan steps whose id is not yet in `completed`.
/// - A step is `ready` once all of its dependencies are *completed*.
///   Completion, not success, unlocks dependents, so a dependent can run
///   even when its dependency failed.
/// - If at least two ready steps are marked `parallel`, that whole subset is
///   the batch; parallel steps are never mixed with sequential ones, and a
///   lone parallel-eligible step is demoted to running alone.
/// - Otherwise the batch is the first ready step in plan order, alone.
pub fn pick_batch(plan: &Plan, completed: &[CompletedStep]) -> PickDecision {
    let completed_ids: HashSet<&str> = completed.iter().map(|c| c.id.as_str()).collect();

    let pending: Vec<&Step> = plan
        .iter()
        .filter(|s| !completed_ids.contains(s.id.as_str()))
        .collect();

    if pending.is_empty() {
        return if completed.iter().all(CompletedStep::is_ok) {
            PickDecision::Done
        } else {
            PickDecision::Failed
        };
    }

    let ready: Vec<&Step> = pending
        .iter()
        .filter(|s| {
            s.depends_on
                .iter()
                .all(|dep| completed_ids.contains(dep.as_str()))
        })
        .copied()
        .collect();

    if ready.is_empty() {
        return PickDecision::Deadlock;
    }

    let parallel_ready: Vec<&Step> = ready
        .iter()
        .filter(|s| s.mode == ExecutionMode::Parallel)
        .copied()
        .collect();

    let batch = if parallel_ready.len() >= 2 {
        parallel_ready
    } else {
        vec![ready[0]]
    };

    PickDecision::Dispatch(batch.into_iter().cloned().collect())
}
