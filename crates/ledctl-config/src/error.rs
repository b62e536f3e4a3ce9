//! Error types for configuration loading, parsing and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, parsing or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML.
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A binding references a sink id that doesn't exist in the snapshot.
    #[error("binding '{binding_id}' references unknown sink '{sink_id}'")]
    UnknownSink { binding_id: String, sink_id: String },

    /// A virtual composite references a member sink id that doesn't exist.
    #[error("virtual composite '{composite_id}' references unknown member '{member_id}'")]
    UnknownMember { composite_id: String, member_id: String },

    /// A field failed range/shape validation.
    #[error("invalid value for '{field}' on '{target}': {reason}")]
    InvalidField { target: String, field: String, reason: String },

    /// Could not determine a config directory to persist into.
    #[error("could not determine a configuration directory")]
    NoConfigDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
