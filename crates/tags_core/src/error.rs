//! Error types for tag configuration, evaluation and mutation

use crate::rules::RuleKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Tags error type
#[derive(Error, Debug)]
pub enum TagsError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not expand '~' in \"{0}\": home directory is unknown")]
    HomeDirUnavailable(String),

    #[error("Invalid arguments: {0}")]
    Argument(String),

    #[error("Unknown rule type: {0}")]
    UnknownRuleKind(String),

    #[error("Rule \"{kind}\" not found in tag \"{tag}\"")]
    RuleNotFound { tag: String, kind: RuleKind },

    #[error("Tag \"{0}\" not found")]
    TagNotFound(String),

    #[error("Evaluation task failed: {0}")]
    TaskFailed(String),
}

impl TagsError {
    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an argument error.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Attach a path to an IO error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TagsError>;
