// tests/plan_normalization.rs

mod common;
use crate::common::init_tracing;

use serde_json::json;

use agentdag::plan::{extract_json_object, infer_backend, normalize_plan};
use agentdag::types::{BackendKind, ExecutionMode};

#[test]
fn plan_with_explicit_fields_is_kept_as_is() {
    init_tracing();
    let raw = json!({
        "steps": [
            {
                "id": "S1",
                "title": "Write parser",
                "backend": "codex",
                "execution": "sequential",
                "depends_on": [],
                "objective": "implement the parser"
            },
            {
                "id": "S2",
                "title": "Review architecture",
                "backend": "claude",
                "execution": "parallel",
                "depends_on": ["S1"],
                "objective": "review the design"
            }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    assert_eq!(plan.len(), 2);

    let s1 = plan.get("S1").unwrap();
    assert_eq!(s1.backend, BackendKind::Codex);
    assert_eq!(s1.mode, ExecutionMode::Sequential);
    assert!(s1.depends_on.is_empty());

    let s2 = plan.get("S2").unwrap();
    assert_eq!(s2.backend, BackendKind::Claude);
    assert_eq!(s2.mode, ExecutionMode::Parallel);
    assert_eq!(s2.depends_on, vec!["S1".to_string()]);
}

#[test]
fn missing_ids_are_synthesized_in_order() {
    let raw = json!({
        "steps": [
            { "title": "first" },
            { "title": "second" }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    let ids: Vec<&str> = plan.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["S1", "S2"]);
}

#[test]
fn duplicate_ids_get_an_ordinal_suffix() {
    let raw = json!({
        "steps": [
            { "id": "S1", "title": "a" },
            { "id": "S1", "title": "b" },
            { "id": "S1", "title": "c" }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    let ids: Vec<&str> = plan.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], "S1");
    assert_ne!(ids[1], ids[0]);
    assert_ne!(ids[2], ids[1]);
    assert_ne!(ids[2], ids[0]);
}

#[test]
fn self_dependency_is_stripped_and_mode_defaults_to_sequential() {
    let raw = json!({
        "steps": [
            { "id": "S1", "title": "loop", "depends_on": ["S1"] }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    let s1 = plan.get("S1").unwrap();
    assert!(s1.depends_on.is_empty());
    assert_eq!(s1.mode, ExecutionMode::Sequential);
}

#[test]
fn unknown_dependencies_are_dropped() {
    let raw = json!({
        "steps": [
            { "id": "S1", "title": "a", "depends_on": ["S9", "S2"] },
            { "id": "S2", "title": "b" }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    assert_eq!(plan.get("S1").unwrap().depends_on, vec!["S2".to_string()]);
}

#[test]
fn non_list_depends_on_becomes_empty() {
    let raw = json!({
        "steps": [
            { "id": "S1", "title": "a", "depends_on": "S2" },
            { "id": "S2", "title": "b" }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    assert!(plan.get("S1").unwrap().depends_on.is_empty());
}

#[test]
fn non_object_steps_are_skipped() {
    let raw = json!({
        "steps": [
            "not a step",
            42,
            { "id": "S3", "title": "real" }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    assert_eq!(plan.len(), 1);
    assert!(plan.get("S3").is_some());
}

#[test]
fn empty_plan_degenerates_to_single_step() {
    let raw = json!({ "steps": [] });
    let plan = normalize_plan(Some(&raw), "ship the release", None, None);

    assert_eq!(plan.len(), 1);
    let step = plan.get("S1").unwrap();
    assert_eq!(step.title, "Solve user task");
    assert_eq!(step.objective, "ship the release");
}

#[test]
fn absent_raw_plan_degenerates_to_single_step() {
    let plan = normalize_plan(None, "do a thing", None, None);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.get("S1").unwrap().objective, "do a thing");
}

#[test]
fn camel_case_aliases_and_legacy_tool_field_are_accepted() {
    let raw = json!({
        "steps": [
            {
                "id": "S1",
                "title": "a",
                "tool": "agent",
                "executionMode": "parallel",
                "dependsOn": []
            }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    let s1 = plan.get("S1").unwrap();
    assert_eq!(s1.backend, BackendKind::Agent);
    assert_eq!(s1.mode, ExecutionMode::Parallel);
}

#[test]
fn forced_backend_and_mode_override_every_step() {
    let raw = json!({
        "steps": [
            { "id": "S1", "title": "a", "backend": "codex", "execution": "sequential" },
            { "id": "S2", "title": "b", "backend": "claude", "execution": "parallel" }
        ]
    });

    let plan = normalize_plan(
        Some(&raw),
        "task",
        Some(BackendKind::Agent),
        Some(ExecutionMode::Parallel),
    );
    for step in plan.iter() {
        assert_eq!(step.backend, BackendKind::Agent);
        assert_eq!(step.mode, ExecutionMode::Parallel);
    }
}

#[test]
fn unknown_backend_falls_back_to_keyword_inference() {
    let raw = json!({
        "steps": [
            { "id": "S1", "title": "fix the failing test", "backend": "gpt9000" }
        ]
    });

    let plan = normalize_plan(Some(&raw), "task", None, None);
    assert_eq!(plan.get("S1").unwrap().backend, BackendKind::Codex);
}

#[test]
fn inference_needs_a_clear_analysis_margin() {
    // One analysis keyword against zero code keywords is not enough.
    assert_eq!(infer_backend("sketch the design quickly"), BackendKind::Codex);
    // A clear analysis majority flips to claude.
    assert_eq!(
        infer_backend("compare architecture tradeoffs and alternatives"),
        BackendKind::Claude
    );
    // Code keywords dominate.
    assert_eq!(
        infer_backend("fix the build error in the python test"),
        BackendKind::Codex
    );
}

#[test]
fn extract_handles_direct_and_embedded_json() {
    let direct = extract_json_object(r#"{"steps": []}"#).unwrap();
    assert!(direct.get("steps").is_some());

    let embedded = extract_json_object(
        "Sure! Here is the plan:\n```json\n{\"steps\": [{\"id\": \"S1\", \"title\": \"t\"}]}\n```\nDone.",
    )
    .unwrap();
    assert_eq!(
        embedded["steps"][0]["id"],
        serde_json::Value::String("S1".to_string())
    );

    assert!(extract_json_object("no json here at all").is_none());
    assert!(extract_json_object("[1, 2, 3]").is_none());
}
