// src/plan/planner.rs

//! Planning-backend invocation.

use tracing::{debug, warn};

use crate::exec::backend::AgentBackend;
use crate::plan::extract::extract_json_object;
use crate::plan::normalize::normalize_plan;
use crate::plan::Plan;
use crate::types::{BackendKind, ExecutionMode};

/// The designated backend used to produce the initial plan.
pub const PLANNING_BACKEND: BackendKind = BackendKind::Codex;

/// Upper bound on plan size requested from the planner.
pub const MAX_PLAN_STEPS: usize = 6;

/// Ask the planning backend for a step graph and normalize the response.
///
/// Planning failures are never fatal: an unusable response (invocation
/// failure or unparsable JSON) degrades to a single-step plan covering the
/// whole task.
pub async fn produce_plan<B: AgentBackend + ?Sized>(
    backend: &B,
    task: &str,
    forced_backend: Option<BackendKind>,
    forced_mode: Option<ExecutionMode>,
) -> Plan {
    let result = backend.invoke(PLANNING_BACKEND, planner_prompt(task)).await;

    if !result.ok {
        warn!(
            backend = %PLANNING_BACKEND,
            error = %result.error,
            "planning backend invocation failed; falling back to a single-step plan"
        );
    }

    let raw = extract_json_object(&result.output);
    if result.ok && raw.is_none() {
        warn!("planning backend returned no parsable JSON object; falling back to a single-step plan");
    }

    let plan = normalize_plan(raw.as_ref(), task, forced_backend, forced_mode);
    debug!(steps = plan.len(), "plan normalized");
    plan
}

/// Fixed instruction template requesting strict JSON matching the step
/// schema.
pub fn planner_prompt(task: &str) -> String {
    format!(
        r#"You are an orchestration planner.
Return STRICT JSON only, no markdown, no prose.

Task:
{task}

Create an execution plan with up to {MAX_PLAN_STEPS} steps.
Use this schema exactly:
{{
  "steps": [
    {{
      "id": "S1",
      "title": "short title",
      "backend": "codex|claude|agent",
      "execution": "sequential|parallel",
      "depends_on": [],
      "objective": "what this step must produce"
    }}
  ]
}}

Rules:
- Pick a backend per step:
  - codex: code edits, tests, terminal-heavy debugging
  - claude: architecture/research/spec decomposition
  - agent: second-pass validation or alternative implementation checks
- Prefer parallel only for independent steps.
- Steps must be dependency-safe."#
    )
}
