// src/summary.rs

//! End-of-run summary rendering.

use crate::engine::RunState;

/// Render the human-readable run summary: a status header, one line per
/// executed step, and each step's full output.
pub fn render_summary(state: &RunState) -> String {
    let mut out = String::new();

    out.push_str("=== Orchestration Summary ===\n");
    out.push_str(&format!("status: {}\n", state.status));
    for step in &state.completed {
        out.push_str(&format!(
            "- {} [{}] {} :: {}\n",
            step.id, step.backend_used, step.status, step.title
        ));
    }

    out.push_str("\n=== Final Outputs ===\n");
    for step in &state.completed {
        out.push_str(&format!("\n[{}]\n{}\n", step.id, step.output));
    }

    out
}

/// Join non-empty step outputs into one block, for piping into another tool.
pub fn collect_outputs(state: &RunState) -> String {
    state
        .completed
        .iter()
        .filter(|step| !step.output.trim().is_empty())
        .map(|step| format!("[{}] {}", step.id, step.output.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
