//! Crate-wide error types.
//!
//! The executor never lets these escape past [`crate::executor::Executor::execute`] —
//! every variant is caught at a profile boundary and converted into the matching
//! [`ExecutionState`](crate::result::ExecutionState) instead. `anyhow` is reserved
//! for the HTTP handler's defense-in-depth 500 path; internal control flow stays
//! on these typed variants so tests can match on them directly.

use std::io;

/// Errors raised while preparing or tearing down a per-request [`Workspace`](crate::workspace::Workspace).
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("failed to create workspace directory: {0}")]
    Create(#[source] io::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Errors raised by the [`ProcessDriver`](crate::process::ProcessDriver).
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write stdin: {0}")]
    Stdin(#[source] io::Error),
}

/// Errors raised while resolving or running a [`LanguageProfile`](crate::profile::LanguageProfile).
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Bundled(#[from] crate::bundled::BundledError),
}
