// src/config/validate.rs

use crate::config::model::{BackendCommand, ConfigFile, RawConfigFile};
use crate::errors::{AgentdagError, Result};
use crate::types::BackendKind;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = AgentdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_defaults(&raw)?;

        let codex = BackendCommand::resolve(BackendKind::Codex, raw.backend.for_kind(BackendKind::Codex));
        let claude = BackendCommand::resolve(BackendKind::Claude, raw.backend.for_kind(BackendKind::Claude));
        let agent = BackendCommand::resolve(BackendKind::Agent, raw.backend.for_kind(BackendKind::Agent));

        for (kind, cmd) in BackendKind::ALL.iter().zip([&codex, &claude, &agent]) {
            validate_backend_command(*kind, cmd)?;
        }

        Ok(ConfigFile::new_unchecked(raw.defaults, codex, claude, agent))
    }
}

fn validate_defaults(raw: &RawConfigFile) -> Result<()> {
    if raw.defaults.max_iterations == 0 {
        return Err(AgentdagError::ConfigError(
            "[defaults].max_iterations must be >= 1 (got 0)".to_string(),
        ));
    }
    if raw.defaults.timeout_secs == 0 {
        return Err(AgentdagError::ConfigError(
            "[defaults].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_backend_command(kind: BackendKind, cmd: &BackendCommand) -> Result<()> {
    if cmd.bin.trim().is_empty() {
        return Err(AgentdagError::ConfigError(format!(
            "[backend.{kind}].bin must not be empty"
        )));
    }
    if cmd.model.trim().is_empty() {
        return Err(AgentdagError::ConfigError(format!(
            "[backend.{kind}].model must not be empty"
        )));
    }
    Ok(())
}
