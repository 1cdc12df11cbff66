use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to assemble a stage command. Raised synchronously; no partial
/// command is ever returned alongside one.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing required configuration value: {key}")]
    MissingConfig { key: &'static str },

    #[error("Missing required artifact: {name}")]
    MissingArtifact { name: &'static str },

    #[error("Invalid artifact {name}: {reason}")]
    InvalidArtifact { name: &'static str, reason: String },

    #[error("Malformed reference index {path:?} at line {line}: {reason}")]
    InvalidIndex {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error on {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CommandError {
    pub fn io(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        CommandError::Io {
            path: path.into(),
            error: format!("{:#}", error),
        }
    }
}
