// src/sched/mod.rs

//! Scheduling decisions over the step graph.
//!
//! The batch-selection logic is a pure function with no IO, so it can be
//! unit tested without Tokio, processes, or a real backend.

pub mod pick;

pub use pick::{pick_batch, PickDecision};
