// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod plan;
pub mod sched;
pub mod summary;
pub mod types;

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::engine::{Orchestrator, RunOptions, RunState};
use crate::exec::CliAgentBackend;
use crate::summary::render_summary;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the CLI agent backend
/// - the orchestration loop
/// - the printed summary
pub async fn run(args: CliArgs) -> Result<RunState> {
    let task = args.task_text();
    if task.is_empty() {
        bail!("no task given; pass the instruction as trailing arguments");
    }

    let cfg = load_or_default(args.config.as_deref())?;

    let options = RunOptions {
        forced_backend: args.backend.resolved(),
        forced_mode: args.mode.resolved(),
        max_iterations: args
            .max_iterations
            .unwrap_or(cfg.defaults().max_iterations),
    };

    let backend = Arc::new(CliAgentBackend::new(cfg));
    let orchestrator = Orchestrator::new(backend, options);
    let state = orchestrator.run(&task).await;

    print!("{}", render_summary(&state));
    Ok(state)
}
