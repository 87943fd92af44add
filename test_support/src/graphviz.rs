//! Helpers for working with the system `dot` binary in integration tests.

use std::process::{Command, ExitStatus};
use tempfile::{TempDir, tempdir};
use thiserror::Error;

/// Errors that can occur when preparing Graphviz-backed integration tests.
#[derive(Error, Debug)]
pub enum DotWorkspaceError {
    /// The `dot -V` probe failed to spawn, most likely because Graphviz is
    /// not present in `PATH`.
    #[error("failed to spawn `dot -V`: {0}")]
    ProbeSpawn(#[source] std::io::Error),
    /// `dot -V` executed but returned a non-success status.
    #[error("`dot -V` returned non-success status: {0}")]
    ProbeFailed(ExitStatus),
    /// Creating the temporary workspace failed.
    #[error("failed to create temporary graphviz workspace: {0}")]
    Workspace(#[source] std::io::Error),
}

fn probe_dot() -> Result<(), DotWorkspaceError> {
    let output = Command::new("dot")
        .arg("-V")
        .output()
        .map_err(DotWorkspaceError::ProbeSpawn)?;

    if !output.status.success() {
        return Err(DotWorkspaceError::ProbeFailed(output.status));
    }
    Ok(())
}

/// Ensure Graphviz is available and return a temporary directory for
/// integration tests. Callers should skip their scenario when this returns
/// `Err`.
pub fn dot_integration_workspace() -> Result<TempDir, DotWorkspaceError> {
    probe_dot()?;
    tempdir().map_err(DotWorkspaceError::Workspace)
}
