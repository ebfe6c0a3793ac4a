// src/cli.rs

//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::{ForcedBackend, ForcedMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Orchestrate a task across CLI agent backends.
#[derive(Debug, Parser)]
#[command(name = "agentdag", version, about)]
pub struct CliArgs {
    /// Task to execute (all trailing words are joined into one instruction).
    pub task: Vec<String>,

    /// Force a single backend for all steps.
    #[arg(long, value_enum, default_value_t = ForcedBackend::Auto)]
    pub backend: ForcedBackend,

    /// Force an execution mode for all steps.
    #[arg(long, value_enum, default_value_t = ForcedMode::Auto)]
    pub mode: ForcedMode,

    /// Safety cap on Pick/Run cycles (defaults to the config value).
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Path to an Agentdag.toml configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (overrides AGENTDAG_LOG).
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// The task words joined into a single instruction.
    pub fn task_text(&self) -> String {
        self.task.join(" ").trim().to_string()
    }
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
