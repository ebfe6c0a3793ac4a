// src/config/mod.rs

//! Configuration layer.
//!
//! An optional `Agentdag.toml` customises backend binaries/models and the
//! run defaults; a missing file means built-in defaults. Deserialization
//! produces a [`RawConfigFile`], which is validated into a [`ConfigFile`]
//! via `TryFrom`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_or_default};
pub use model::{BackendCommand, BackendOverride, ConfigFile, DefaultsSection, RawConfigFile};
