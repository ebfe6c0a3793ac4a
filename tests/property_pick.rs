// tests/property_pick.rs

use std::collections::HashSet;

use proptest::prelude::*;

use agentdag::engine::CompletedStep;
use agentdag::plan::Plan;
use agentdag::sched::{pick_batch, PickDecision};
use agentdag::types::{BackendKind, ExecutionMode, StepStatus};
use agentdag_test_utils::builders::{PlanBuilder, StepBuilder};

// Strategy to generate small plans. Dependencies may point anywhere,
// including forward or into a cycle; the scheduler must surface those as a
// deadlock rather than loop forever.
fn plan_strategy(max_steps: usize) -> impl Strategy<Value = Plan> {
    (1..=max_steps).prop_flat_map(|num_steps| {
        let step_strat = proptest::collection::vec(
            (
                proptest::collection::vec(0..num_steps, 0..3), // raw dep indices
                any::<bool>(),                                 // parallel?
            ),
            num_steps,
        );

        step_strat.prop_map(move |raw_steps| {
            let mut builder = PlanBuilder::new();
            for (i, (dep_indices, parallel)) in raw_steps.into_iter().enumerate() {
                let mut step = StepBuilder::new(&format!("S{i}"));
                if parallel {
                    step = step.mode(ExecutionMode::Parallel);
                }
                let deps: HashSet<usize> =
                    dep_indices.into_iter().filter(|&d| d != i).collect();
                for dep in deps {
                    step = step.depends_on(&format!("S{dep}"));
                }
                builder = builder.with_step(step.build());
            }
            builder.build()
        })
    })
}

fn complete(step_id: &str, failing: &HashSet<String>) -> CompletedStep {
    CompletedStep {
        id: step_id.to_string(),
        title: step_id.to_string(),
        backend_used: BackendKind::Codex,
        status: if failing.contains(step_id) {
            StepStatus::Failed
        } else {
            StepStatus::Ok
        },
        output: String::new(),
    }
}

proptest! {
    #[test]
    fn pick_loop_always_terminates_consistently(
        plan in plan_strategy(8),
        failing_indices in proptest::collection::vec(0..8usize, 0..4),
    ) {
        let failing: HashSet<String> =
            failing_indices.iter().map(|i| format!("S{i}")).collect();

        let mut completed: Vec<CompletedStep> = Vec::new();
        let mut dispatches = 0usize;

        let outcome = loop {
            match pick_batch(&plan, &completed) {
                PickDecision::Dispatch(batch) => {
                    dispatches += 1;
                    // Every dispatch makes progress, so this cannot exceed
                    // the plan size.
                    prop_assert!(dispatches <= plan.len());
                    prop_assert!(!batch.is_empty());

                    // Multi-step batches are all-parallel.
                    if batch.len() > 1 {
                        for step in &batch {
                            prop_assert_eq!(step.mode, ExecutionMode::Parallel);
                        }
                    }

                    for step in &batch {
                        // Never re-dispatch a completed step.
                        prop_assert!(completed.iter().all(|c| c.id != step.id));
                        completed.push(complete(&step.id, &failing));
                    }
                }
                terminal => break terminal,
            }
        };

        // Completed ids stay unique.
        let unique: HashSet<&str> = completed.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(unique.len(), completed.len());

        match outcome {
            PickDecision::Done => {
                prop_assert_eq!(completed.len(), plan.len());
                prop_assert!(completed.iter().all(CompletedStep::is_ok));
            }
            PickDecision::Failed => {
                prop_assert_eq!(completed.len(), plan.len());
                prop_assert!(completed.iter().any(|c| !c.is_ok()));
            }
            PickDecision::Deadlock => {
                // A deadlock means unreachable steps remain.
                prop_assert!(completed.len() < plan.len());
            }
            PickDecision::Dispatch(_) => unreachable!(),
        }
    }
}
