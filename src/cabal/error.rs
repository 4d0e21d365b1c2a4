//! Error types for cabal tool invocations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while driving the external tools.
#[derive(Debug, Error)]
pub enum CabalError {
    /// The executable could not be started.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a running process failed.
    #[error("failed to wait for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A package description path with no directory to run in.
    #[error("no parent directory for {}", .0.display())]
    NoParentDirectory(PathBuf),

    /// IO error while reading tool output or the package index.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
