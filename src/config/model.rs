// src/config/model.rs

//! Typed model for `Agentdag.toml`.

use serde::Deserialize;

use crate::types::BackendKind;

/// Raw, unvalidated configuration as deserialized from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub defaults: DefaultsSection,
    #[serde(default)]
    pub backend: BackendsSection,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    /// Cap on Pick/Run cycles per orchestration.
    pub max_iterations: u32,
    /// Per-invocation timeout for a backend process.
    pub timeout_secs: u64,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            max_iterations: 8,
            timeout_secs: 1800,
        }
    }
}

/// `[backend.*]` sections, one per backend kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendsSection {
    pub codex: BackendOverride,
    pub claude: BackendOverride,
    pub agent: BackendOverride,
}

impl BackendsSection {
    pub fn for_kind(&self, kind: BackendKind) -> &BackendOverride {
        match kind {
            BackendKind::Codex => &self.codex,
            BackendKind::Claude => &self.claude,
            BackendKind::Agent => &self.agent,
        }
    }
}

/// Per-backend overrides; unset fields keep their built-in values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendOverride {
    pub bin: Option<String>,
    pub model: Option<String>,
    pub args: Option<Vec<String>>,
    pub scrub_env: Option<Vec<String>>,
}

/// Fully resolved command settings for one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCommand {
    /// Executable name or path.
    pub bin: String,
    /// Model passed on every invocation.
    pub model: String,
    /// Leading arguments, before the model flag and the prompt.
    pub args: Vec<String>,
    /// Environment variables removed for this invocation only.
    ///
    /// Models ambient-credential scrubbing as explicit per-invocation data
    /// instead of mutating global process state.
    pub scrub_env: Vec<String>,
}

impl BackendCommand {
    /// Built-in settings used when the config file is absent or silent.
    pub fn builtin(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Codex => Self {
                bin: "codex".to_string(),
                model: "gpt-5.3-codex".to_string(),
                args: vec!["exec".to_string(), "--full-auto".to_string()],
                scrub_env: Vec::new(),
            },
            BackendKind::Claude => Self {
                bin: "claude".to_string(),
                model: "sonnet".to_string(),
                args: vec!["-p".to_string()],
                // Local claude auth can work even when a stale API key is
                // present in the environment.
                scrub_env: vec!["ANTHROPIC_API_KEY".to_string()],
            },
            BackendKind::Agent => Self {
                bin: "agent".to_string(),
                model: "gpt-5.2".to_string(),
                args: vec!["--print".to_string()],
                scrub_env: Vec::new(),
            },
        }
    }

    /// Apply a raw override on top of the built-in settings.
    pub(crate) fn resolve(kind: BackendKind, over: &BackendOverride) -> Self {
        let base = Self::builtin(kind);
        Self {
            bin: over.bin.clone().unwrap_or(base.bin),
            model: over.model.clone().unwrap_or(base.model),
            args: over.args.clone().unwrap_or(base.args),
            scrub_env: over.scrub_env.clone().unwrap_or(base.scrub_env),
        }
    }
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (or [`Default`], whose
/// built-in values always validate).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    defaults: DefaultsSection,
    codex: BackendCommand,
    claude: BackendCommand,
    agent: BackendCommand,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        defaults: DefaultsSection,
        codex: BackendCommand,
        claude: BackendCommand,
        agent: BackendCommand,
    ) -> Self {
        Self {
            defaults,
            codex,
            claude,
            agent,
        }
    }

    pub fn defaults(&self) -> &DefaultsSection {
        &self.defaults
    }

    pub fn command_for(&self, kind: BackendKind) -> &BackendCommand {
        match kind {
            BackendKind::Codex => &self.codex,
            BackendKind::Claude => &self.claude,
            BackendKind::Agent => &self.agent,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            defaults: DefaultsSection::default(),
            codex: BackendCommand::builtin(BackendKind::Codex),
            claude: BackendCommand::builtin(BackendKind::Claude),
            agent: BackendCommand::builtin(BackendKind::Agent),
        }
    }
}
