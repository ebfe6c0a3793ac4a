// src/exec/prompt.rs

//! Per-step prompt construction.

use crate::engine::CompletedStep;
use crate::plan::Step;

/// How many of the most recent completed steps are quoted back as context.
pub const RECENT_CONTEXT_STEPS: usize = 3;

/// Context outputs are collapsed to one line and capped at this length.
pub const CONTEXT_OUTPUT_MAX_CHARS: usize = 700;

/// Build the prompt for one step: the global task, the step itself, and a
/// bounded window of recent completed outputs.
pub fn step_prompt(task: &str, step: &Step, completed: &[CompletedStep]) -> String {
    let context = if completed.is_empty() {
        "- none".to_string()
    } else {
        let start = completed.len().saturating_sub(RECENT_CONTEXT_STEPS);
        completed[start..]
            .iter()
            .map(context_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"Global task:
{task}

Current subtask:
- id: {id}
- title: {title}
- objective: {objective}

Recent completed context:
{context}

Execution requirements:
1. Execute the subtask directly.
2. Use tools/files as needed.
3. Return a concise result including:
   - actions performed
   - key evidence (files/tests/logs)
   - blockers (if any)"#,
        id = step.id,
        title = step.title,
        objective = step.objective,
    )
}

fn context_line(item: &CompletedStep) -> String {
    let mut short: String = item.output.trim().replace('\n', " ");
    if short.chars().count() > CONTEXT_OUTPUT_MAX_CHARS {
        short = short.chars().take(CONTEXT_OUTPUT_MAX_CHARS).collect();
        short.push_str("...");
    }
    format!(
        "- {} [{}] {}: {}",
        item.id, item.backend_used, item.status, short
    )
}
