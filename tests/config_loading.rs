// tests/config_loading.rs

mod common;
use crate::common::init_tracing;

use std::io::Write as _;
use std::path::Path;

use agentdag::config::{load_and_validate, load_or_default, ConfigFile};
use agentdag::errors::AgentdagError;
use agentdag::types::BackendKind;

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("Agentdag.toml");
    let mut file = std::fs::File::create(&path).expect("create config file");
    file.write_all(contents.as_bytes()).expect("write config");
    path
}

#[test]
fn builtin_defaults_apply_without_a_config_file() {
    init_tracing();
    let cfg = ConfigFile::default();

    assert_eq!(cfg.defaults().max_iterations, 8);
    assert_eq!(cfg.defaults().timeout_secs, 1800);

    let codex = cfg.command_for(BackendKind::Codex);
    assert_eq!(codex.bin, "codex");
    assert_eq!(codex.args, vec!["exec".to_string(), "--full-auto".to_string()]);

    let claude = cfg.command_for(BackendKind::Claude);
    assert_eq!(claude.scrub_env, vec!["ANTHROPIC_API_KEY".to_string()]);
}

#[test]
fn config_file_overrides_selected_fields_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
[defaults]
max_iterations = 3

[backend.claude]
model = "opus"
"#,
    );

    let cfg = load_and_validate(&path).expect("load config");
    assert_eq!(cfg.defaults().max_iterations, 3);
    // Unset defaults keep their built-in values.
    assert_eq!(cfg.defaults().timeout_secs, 1800);

    let claude = cfg.command_for(BackendKind::Claude);
    assert_eq!(claude.model, "opus");
    assert_eq!(claude.bin, "claude");

    // Other backends untouched.
    assert_eq!(cfg.command_for(BackendKind::Agent).bin, "agent");
}

#[test]
fn zero_max_iterations_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[defaults]\nmax_iterations = 0\n");

    match load_and_validate(&path) {
        Err(AgentdagError::ConfigError(msg)) => assert!(msg.contains("max_iterations")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn zero_timeout_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[defaults]\ntimeout_secs = 0\n");

    assert!(matches!(
        load_and_validate(&path),
        Err(AgentdagError::ConfigError(_))
    ));
}

#[test]
fn empty_backend_bin_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[backend.codex]\nbin = \"\"\n");

    assert!(matches!(
        load_and_validate(&path),
        Err(AgentdagError::ConfigError(_))
    ));
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");

    assert!(matches!(
        load_or_default(Some(&missing)),
        Err(AgentdagError::IoError(_))
    ));
}

#[test]
fn malformed_toml_is_a_toml_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "this is not toml = = =");

    assert!(matches!(
        load_and_validate(&path),
        Err(AgentdagError::TomlError(_))
    ));
}
