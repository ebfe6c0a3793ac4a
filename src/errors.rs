// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! These cover the outer shell only (config loading, CLI validation,
//! logging setup). Inside the scheduling core, every abnormal condition is
//! encoded as data on the run state rather than raised as an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, AgentdagError>;
