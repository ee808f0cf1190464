//! Per-request working directory lifecycle.
//!
//! Each request gets a [`Workspace`] rooted at a fresh `uuid::Uuid` under a
//! configured temp root. No two concurrent requests share one, and the
//! directory is removed on every exit path via `Drop` — including early
//! returns from the `?` operator inside [`crate::executor::Executor`].

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::WorkspaceError;

/// An exclusively-owned per-request directory.
///
/// `Workspace` does not implement `Clone`: ownership is the whole point, and
/// cloning would make it ambiguous which handle is responsible for teardown.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    /// Creates a fresh directory under `root`, named with a random UUID.
    pub async fn create(root: &Path) -> Result<Self, WorkspaceError> {
        let path = root.join(Uuid::new_v4().to_string());
        fs::create_dir_all(&path)
            .await
            .map_err(WorkspaceError::Create)?;
        Ok(Self { path })
    }

    /// The workspace's root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path to `relative` inside this workspace, without creating it.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }

    /// Writes `bytes` to `relative` inside this workspace, creating parent
    /// directories as needed.
    pub async fn write_file(
        &self,
        relative: impl AsRef<Path>,
        bytes: impl AsRef<[u8]>,
    ) -> Result<PathBuf, WorkspaceError> {
        let target = self.path.join(relative.as_ref());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(WorkspaceError::Create)?;
        }
        fs::write(&target, bytes)
            .await
            .map_err(|source| WorkspaceError::Write {
                path: target.display().to_string(),
                source,
            })?;
        Ok(target)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        // Synchronous removal: Drop can't await, and the teardown must run
        // on every exit path including panics unwinding through `?`.
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove workspace");
            }
        }
    }
}
