// src/exec/invocation.rs

//! Construction of per-backend command invocations.

use crate::config::BackendCommand;
use crate::types::BackendKind;

/// Fully resolved process invocation for one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Environment variables removed for this invocation only.
    pub scrub_env: Vec<String>,
}

/// Build the argv for one backend call.
///
/// Layout: configured leading args, then the model flag (`-m` for codex,
/// `--model` for claude/agent), then the prompt as the final positional
/// argument.
pub fn build_invocation(kind: BackendKind, cmd: &BackendCommand, prompt: &str) -> InvocationSpec {
    let mut args = cmd.args.clone();

    match kind {
        BackendKind::Codex => args.push("-m".to_string()),
        BackendKind::Claude | BackendKind::Agent => args.push("--model".to_string()),
    }
    args.push(cmd.model.clone());
    args.push(prompt.to_string());

    InvocationSpec {
        program: cmd.bin.clone(),
        args,
        scrub_env: cmd.scrub_env.clone(),
    }
}
