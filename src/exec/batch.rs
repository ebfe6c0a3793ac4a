// src/exec/batch.rs

//! Concurrent execution of a dispatched batch.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::engine::CompletedStep;
use crate::exec::backend::AgentBackend;
use crate::exec::step_runner::run_step;
use crate::plan::Step;

/// Upper bound on concurrently running steps within one batch.
pub const MAX_BATCH_WORKERS: usize = 4;

/// Run a dispatched batch to completion.
///
/// A single-step batch runs inline. A multi-step batch fans out over a
/// bounded worker pool; every step in it sees the same `completed` snapshot,
/// so siblings never observe each other's output. Results come back sorted
/// by step id so the run log is deterministic regardless of finish order.
pub async fn run_batch<B: AgentBackend + 'static>(
    backend: Arc<B>,
    task: &str,
    batch: &[Step],
    completed: &[CompletedStep],
) -> Vec<CompletedStep> {
    if batch.len() == 1 {
        info!(step = %batch[0].id, mode = "single", "running batch");
        return vec![run_step(backend.as_ref(), task, &batch[0], completed).await];
    }

    let ids: Vec<&str> = batch.iter().map(|s| s.id.as_str()).collect();
    info!(?ids, mode = "parallel", "running batch");

    let task: Arc<str> = Arc::from(task);
    let snapshot = Arc::new(completed.to_vec());
    let pool = Arc::new(Semaphore::new(MAX_BATCH_WORKERS.min(batch.len())));

    let mut workers = JoinSet::new();
    for step in batch.iter().cloned() {
        let backend = Arc::clone(&backend);
        let task = Arc::clone(&task);
        let snapshot = Arc::clone(&snapshot);
        let pool = Arc::clone(&pool);
        workers.spawn(async move {
            // The semaphore is never closed while workers hold it.
            let _permit = pool.acquire_owned().await.ok();
            run_step(backend.as_ref(), &task, &step, &snapshot).await
        });
    }

    let mut results = Vec::with_capacity(batch.len());
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(err) => warn!(error = %err, "batch worker panicked"),
        }
    }

    results.sort_by(|a, b| a.id.cmp(&b.id));
    results
}
