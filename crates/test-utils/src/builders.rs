#![allow(dead_code)]

use agentdag::plan::{Plan, Step};
use agentdag::types::{BackendKind, ExecutionMode};

/// Builder for `Step` to simplify test setup.
pub struct StepBuilder {
    step: Step,
}

impl StepBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            step: Step {
                id: id.to_string(),
                title: format!("step {id}"),
                backend: BackendKind::Codex,
                mode: ExecutionMode::Sequential,
                depends_on: vec![],
                objective: format!("do {id}"),
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.step.title = title.to_string();
        self
    }

    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.step.backend = backend;
        self
    }

    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.step.mode = mode;
        self
    }

    pub fn parallel(mut self) -> Self {
        self.step.mode = ExecutionMode::Parallel;
        self
    }

    pub fn depends_on(mut self, dep: &str) -> Self {
        self.step.depends_on.push(dep.to_string());
        self
    }

    pub fn objective(mut self, objective: &str) -> Self {
        self.step.objective = objective.to_string();
        self
    }

    pub fn build(self) -> Step {
        self.step
    }
}

/// Builder for `Plan`.
pub struct PlanBuilder {
    steps: Vec<Step>,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self { steps: vec![] }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Plan {
        Plan::new(self.steps)
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}
