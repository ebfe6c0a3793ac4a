// src/plan/mod.rs

//! Plan model and normalization.
//!
//! A [`Plan`] is an ordered sequence of [`Step`]s produced by normalizing
//! whatever text the planning backend returned:
//!
//! - [`extract`] pulls a JSON object out of free-form text.
//! - [`infer`] resolves a backend from a step's descriptive text.
//! - [`normalize`] turns the raw JSON into a validated, internally
//!   consistent plan.
//! - [`planner`] invokes the planning backend and ties the above together.
//!
//! Plans are not required to be acyclic: a dependency cycle surfaces as a
//! scheduling deadlock at run time, not as a normalization error.

pub mod extract;
pub mod infer;
pub mod normalize;
pub mod planner;

pub use extract::extract_json_object;
pub use infer::infer_backend;
pub use normalize::normalize_plan;

use crate::types::{BackendKind, ExecutionMode};

/// Canonical step id type used throughout the crate.
pub type StepId = String;

/// A single unit of work within a plan. Immutable once normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: StepId,
    pub title: String,
    pub backend: BackendKind,
    pub mode: ExecutionMode,
    /// Step ids this step waits on. Always resolve within the same plan and
    /// never reference the step itself.
    pub depends_on: Vec<StepId>,
    /// Free text instructing the backend.
    pub objective: String,
}

/// Ordered sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }
}
