// src/plan/normalize.rs

//! Raw planning JSON → validated [`Plan`].

use std::collections::HashSet;

use serde_json::Value;

use crate::plan::infer::infer_backend;
use crate::plan::{Plan, Step};
use crate::types::{BackendKind, ExecutionMode};

/// Normalize a raw planning response into a non-empty, internally
/// consistent plan.
///
/// Tolerates the usual planner sloppiness:
/// - non-object step entries are skipped
/// - missing ids are synthesized (`S<ordinal>`), duplicates get an ordinal
///   suffix
/// - unknown backends fall back to keyword inference, unknown modes to
///   `sequential`
/// - `depends_on` that is not a list becomes empty; unknown and self
///   dependencies are dropped in a post-pass
///
/// If no valid step survives, a single degenerate step covering the whole
/// task is synthesized. A forced backend or mode overrides every step
/// unconditionally.
pub fn normalize_plan(
    raw: Option<&Value>,
    task: &str,
    forced_backend: Option<BackendKind>,
    forced_mode: Option<ExecutionMode>,
) -> Plan {
    let raw_steps = raw
        .and_then(|v| v.get("steps"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut steps: Vec<Step> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (ordinal, item) in raw_steps.iter().enumerate() {
        let ordinal = ordinal + 1;
        let Some(obj) = item.as_object() else {
            continue;
        };

        let mut id = field(obj, &["id"])
            .and_then(value_to_string)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("S{ordinal}"));
        while seen_ids.contains(&id) {
            id = format!("{id}_{ordinal}");
        }
        seen_ids.insert(id.clone());

        let title = field(obj, &["title"])
            .and_then(value_to_string)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("Step {ordinal}"));

        let objective = field(obj, &["objective"])
            .and_then(value_to_string)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| title.clone());

        // "tool" is the legacy wire name for the backend field.
        let backend = match forced_backend {
            Some(kind) => kind,
            None => field(obj, &["backend", "tool"])
                .and_then(value_to_string)
                .and_then(|s| s.parse::<BackendKind>().ok())
                .unwrap_or_else(|| infer_backend(&format!("{title} {objective}"))),
        };

        let mode = match forced_mode {
            Some(mode) => mode,
            None => field(obj, &["execution", "execution_mode", "executionMode"])
                .and_then(value_to_string)
                .and_then(|s| s.parse::<ExecutionMode>().ok())
                .unwrap_or_default(),
        };

        let depends_on = field(obj, &["depends_on", "dependsOn"])
            .map(string_list)
            .unwrap_or_default();

        steps.push(Step {
            id,
            title,
            backend,
            mode,
            depends_on,
            objective,
        });
    }

    if steps.is_empty() {
        steps.push(degenerate_step(task, forced_backend, forced_mode));
    }

    // Dependency sanitation: drop references that do not resolve within the
    // plan, and self-references. Cycles are left in place; they surface as a
    // run-time deadlock.
    let valid_ids: HashSet<String> = steps.iter().map(|s| s.id.clone()).collect();
    for step in &mut steps {
        let own_id = step.id.clone();
        step.depends_on
            .retain(|dep| *dep != own_id && valid_ids.contains(dep));
    }

    Plan::new(steps)
}

/// Single step covering the entire task, used when nothing else survives.
fn degenerate_step(
    task: &str,
    forced_backend: Option<BackendKind>,
    forced_mode: Option<ExecutionMode>,
) -> Step {
    Step {
        id: "S1".to_string(),
        title: "Solve user task".to_string(),
        backend: forced_backend.unwrap_or_else(|| infer_backend(task)),
        mode: forced_mode.unwrap_or_default(),
        depends_on: Vec::new(),
        objective: task.to_string(),
    }
}

/// First present field among `names` (wire format accepts snake_case and
/// camelCase aliases since planner output is untrusted).
fn field<'a>(obj: &'a serde_json::Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| obj.get(*name))
}

/// Coerce a scalar JSON value into a trimmed string.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a JSON value into a list of non-empty strings; anything that is
/// not a list yields an empty one.
fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(value_to_string)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
