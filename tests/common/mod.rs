#![allow(dead_code)]

pub use agentdag_test_utils::{init_tracing, with_timeout};
