//! Process helpers for DOT file lifecycle and renderer subprocess I/O.
//! Internal to `runner`; public API is re-exported from `runner/mod.rs`.

use super::DotContent;
use anyhow::{Context, Result as AnyResult, anyhow};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use dot_env::{DOT_ENV, DOT_PROGRAM};
use std::{
    env,
    ffi::OsString,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    thread,
};
use tracing::info;

fn resolve_dot_program_with<F>(mut read_env: F) -> PathBuf
where
    F: FnMut(&str) -> Option<OsString>,
{
    read_env(DOT_ENV)
        .filter(|value| !value.is_empty())
        .map_or_else(|| PathBuf::from(DOT_PROGRAM), PathBuf::from)
}

/// Renderer executable: [`DOT_ENV`] when set, otherwise `dot` from `PATH`.
#[must_use]
pub fn resolve_dot_program() -> PathBuf {
    resolve_dot_program_with(|key| env::var_os(key))
}

/// Write `content` to a fresh temporary `.gv` file that lives as long as the
/// returned handle.
pub fn create_temp_dot_file(content: &DotContent) -> AnyResult<tempfile::NamedTempFile> {
    let mut tmp = tempfile::Builder::new()
        .prefix("mikado.")
        .suffix(".gv")
        .tempfile()
        .context("create temporary DOT file")?;
    {
        let handle = tmp.as_file_mut();
        handle
            .write_all(content.as_str().as_bytes())
            .context("write temporary DOT file")?;
        handle.flush().context("flush temporary DOT file")?;
    }
    info!("Wrote temporary DOT file to {}", tmp.path().display());
    Ok(tmp)
}

fn write_dot_file_utf8(dir: &Dir, path: &Utf8Path, content: &DotContent) -> AnyResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        dir.create_dir_all(parent)
            .with_context(|| format!("create parent directory {parent}"))?;
    }
    let mut file = dir
        .create(path)
        .with_context(|| format!("create DOT file {path}"))?;
    file.write_all(content.as_str().as_bytes())
        .with_context(|| format!("write DOT file {path}"))?;
    file.flush().with_context(|| format!("flush DOT file {path}"))?;
    file.sync_all()
        .with_context(|| format!("sync DOT file {path}"))?;
    Ok(())
}

/// Open the directory `path` is written through and the path relative to it.
///
/// Relative paths resolve against the working directory. Absolute paths, and
/// relative ones climbing out of the working directory, use their nearest
/// existing ancestor so missing parents can still be created.
fn derive_dir_and_relative(path: &Utf8Path) -> AnyResult<(Dir, Utf8PathBuf)> {
    if path.is_relative() {
        let climbs = path
            .components()
            .any(|part| matches!(part, Utf8Component::ParentDir));
        if !climbs {
            let dir = Dir::open_ambient_dir(".", ambient_authority())
                .context("open working directory")?;
            return Ok((dir, path.to_owned()));
        }
        let cwd = env::current_dir().context("read working directory")?;
        let cwd_utf8 = Utf8PathBuf::from_path_buf(cwd)
            .map_err(|cwd_path| anyhow!("non UTF-8 working directory {}", cwd_path.display()))?;
        return derive_dir_and_relative(&cwd_utf8.join(path));
    }

    let (base, dir) = path
        .ancestors()
        .skip(1)
        .find_map(|candidate| {
            Dir::open_ambient_dir(candidate, ambient_authority())
                .ok()
                .map(|dir| (candidate.to_owned(), dir))
        })
        .ok_or_else(|| anyhow!("no existing ancestor directory for {path}"))?;
    let relative = path
        .strip_prefix(&base)
        .with_context(|| format!("derive {path} relative to {base}"))?
        .to_owned();
    Ok((dir, relative))
}

/// Write `content` to `path`, replacing any existing file and creating
/// missing parent directories.
pub fn write_dot_file(path: &Utf8Path, content: &DotContent) -> AnyResult<()> {
    let (dir, relative) = derive_dir_and_relative(path)?;
    write_dot_file_utf8(&dir, &relative, content)?;
    info!("Wrote DOT file to {path}");
    Ok(())
}

/// Print `content` on standard output. A closed pipe is not an error.
pub fn write_dot_stdout(content: &DotContent) -> AnyResult<()> {
    let mut stdout = io::stdout().lock();
    let result = stdout
        .write_all(content.as_str().as_bytes())
        .and_then(|()| stdout.flush());
    match result {
        Err(err) if err.kind() != io::ErrorKind::BrokenPipe => {
            Err(err).context("write DOT to standard output")
        }
        _ => Ok(()),
    }
}

/// Invoke the renderer as `<program> -T<format> -o <output> <input>`.
///
/// The renderer's standard output and error are forwarded line by line.
///
/// # Errors
///
/// Returns an [`io::Error`] if the renderer fails to spawn, its standard
/// streams are unavailable, or it reports a non-zero exit status.
pub fn run_dot(program: &Path, format: &str, input: &Path, output: &Utf8Path) -> io::Result<()> {
    let mut cmd = Command::new(program);
    cmd.arg(format!("-T{format}"))
        .arg("-o")
        .arg(output.as_std_path())
        .arg(input)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    log_command_execution(&cmd);
    let child = cmd.spawn()?;
    let status = spawn_and_stream_output(child)?;
    check_exit_status(status)
}

fn log_command_execution(cmd: &Command) {
    let program_path = PathBuf::from(cmd.get_program());
    let program_display = Utf8PathBuf::from_path_buf(program_path.clone()).map_or_else(
        |_| program_path.to_string_lossy().into_owned(),
        Utf8PathBuf::into_string,
    );
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    info!("Running command: {} {}", program_display, args.join(" "));
}

fn spawn_and_stream_output(mut child: Child) -> io::Result<ExitStatus> {
    let Some(stdout) = child.stdout.take() else {
        terminate_child(&mut child, "stdout pipe unavailable");
        return Err(io::Error::other("child process missing stdout pipe"));
    };
    let Some(stderr) = child.stderr.take() else {
        terminate_child(&mut child, "stderr pipe unavailable");
        return Err(io::Error::other("child process missing stderr pipe"));
    };

    let out_handle = thread::spawn(move || {
        let mut lock = io::stdout().lock();
        forward_child_output(BufReader::new(stdout), &mut lock)
    });
    let err_handle = thread::spawn(move || {
        let mut lock = io::stderr().lock();
        forward_child_output(BufReader::new(stderr), &mut lock)
    });

    let status = child.wait()?;
    handle_forwarding_thread_result(out_handle.join(), "stdout");
    handle_forwarding_thread_result(err_handle.join(), "stderr");
    Ok(status)
}

fn terminate_child(child: &mut Child, context: &str) {
    if let Err(err) = child.kill() {
        tracing::debug!("failed to kill child after {context}: {err}");
    }
    if let Err(err) = child.wait() {
        tracing::debug!("failed to reap child after {context}: {err}");
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ForwardStats {
    lines: usize,
    write_failed: bool,
}

/// Copy lines from `reader` to `writer`, draining the reader even after the
/// writer fails so the child never blocks on a full pipe.
fn forward_child_output(reader: impl BufRead, writer: &mut impl Write) -> ForwardStats {
    let mut stats = ForwardStats::default();
    for line in reader.lines().map_while(Result::ok) {
        stats.lines += 1;
        if stats.write_failed {
            continue;
        }
        if writeln!(writer, "{line}").is_err() {
            stats.write_failed = true;
        }
    }
    stats
}

fn handle_forwarding_thread_result(result: thread::Result<ForwardStats>, stream_name: &str) {
    match result {
        Ok(stats) => {
            if stats.write_failed {
                tracing::debug!(
                    "{stream_name} forwarding encountered closed pipe; output truncated"
                );
            }
        }
        Err(err) => {
            tracing::warn!("{stream_name} forwarding thread panicked: {err:?}");
        }
    }
}

fn check_exit_status(status: ExitStatus) -> io::Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("renderer exited with {status}")))
    }
}
