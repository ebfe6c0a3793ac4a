// src/plan/infer.rs

//! Keyword-based backend inference.
//!
//! A simple scoring heuristic, not a classifier: two fixed keyword sets are
//! counted against the step's descriptive text and the margin decides. Kept
//! as a pure function so the tie-breaking rule stays auditable.

use crate::types::BackendKind;

const CODE_KEYWORDS: &[&str] = &[
    "bug",
    "error",
    "fix",
    "test",
    "build",
    "typescript",
    "python",
    "flutter",
    "api",
    "endpoint",
    "sql",
    "migration",
];

const ANALYSIS_KEYWORDS: &[&str] = &[
    "architecture",
    "design",
    "tradeoff",
    "compare",
    "alternatives",
    "adr",
    "rfc",
    "roadmap",
];

/// Resolve a backend from descriptive text (title + objective).
///
/// The analysis backend has to clearly dominate before it is chosen: it
/// wins only when its score exceeds the code score by at least 2. Ties and
/// near-ties go to the code backend.
pub fn infer_backend(text: &str) -> BackendKind {
    let lower = text.to_lowercase();

    let code_score = CODE_KEYWORDS.iter().filter(|k| lower.contains(*k)).count();
    let analysis_score = ANALYSIS_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();

    if analysis_score >= code_score + 2 {
        BackendKind::Claude
    } else {
        BackendKind::Codex
    }
}
