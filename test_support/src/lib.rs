//! Test utilities for renderer process management.
//!
//! This module provides helpers for creating fake `dot` executables that
//! stand in for Graphviz in integration tests.

pub mod graphviz;

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use dot_env::DOT_ENV;

fn write_script(dir: &Path, body: &str) -> Result<PathBuf> {
    let path = dir.join("dot");
    let mut file = File::create(&path).context("create fake dot script")?;
    writeln!(file, "#!/bin/sh\n{body}").context("write fake dot script")?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)
            .context("read fake dot metadata")?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).context("mark fake dot executable")?;
    }
    Ok(path)
}

/// Create a fake renderer that exits with `exit_code`.
///
/// Returns the temporary directory and the path to the executable.
pub fn fake_dot(exit_code: u8) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new().context("create fake dot dir")?;
    let path = write_script(dir.path(), &format!("exit {exit_code}"))?;
    Ok((dir, path))
}

/// Paths written by [`fake_dot_capture`].
#[derive(Debug, Clone)]
pub struct Capture {
    /// Arguments the renderer received, one per line.
    pub args: PathBuf,
    /// Copy of the DOT file the renderer was asked to read.
    pub input: PathBuf,
}

/// Create a fake renderer that records its arguments and input, then writes
/// a placeholder image to the `-o` path.
///
/// The script expects the `-T<fmt> -o <out> <in>` argument order.
pub fn fake_dot_capture() -> Result<(TempDir, PathBuf, Capture)> {
    let dir = TempDir::new().context("create fake dot dir")?;
    let capture = Capture {
        args: dir.path().join("args"),
        input: dir.path().join("input.gv"),
    };
    let body = format!(
        concat!(
            "printf '%s\\n' \"$@\" > '{args}'\n",
            "cp \"$4\" '{input}'\n",
            "printf 'image' > \"$3\"\n",
            "exit 0"
        ),
        args = capture.args.display(),
        input = capture.input.display(),
    );
    let path = write_script(dir.path(), &body)?;
    Ok((dir, path, capture))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fake_dot_is_created_in_its_own_dir() {
        let (dir, path) = fake_dot(3).expect("fake dot");
        assert!(path.starts_with(dir.path()));
        let script = fs::read_to_string(&path).expect("read script");
        assert!(script.ends_with("exit 3\n"));
    }
}
