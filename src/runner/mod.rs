//! CLI execution and output dispatch.
//!
//! This module keeps `main` minimal by providing a single entry point. Each
//! input is parsed, compiled to DOT and then either printed or handed to the
//! Graphviz renderer. Inputs are processed one after another and the first
//! failure stops the run.

mod error;
mod paths;
mod process;

pub use error::RunnerError;
pub use paths::{DOT_EXTENSION, InputSource, STDIN_SENTINEL};
pub use process::{resolve_dot_program, run_dot};

use crate::cli::Cli;
use crate::graph::MikadoGraph;
use crate::{dot_gen, parser};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::io;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Wrapper around generated DOT text.
#[derive(Debug, Clone)]
pub struct DotContent(String);
impl DotContent {
    /// Store the provided DOT text.
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self(content)
    }
    /// Borrow the underlying DOT text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Execute the parsed [`Cli`] for every input file.
///
/// # Errors
///
/// Returns an error if an input is missing or malformed, or if the renderer
/// fails.
pub fn run(cli: &Cli) -> Result<()> {
    for file in &cli.files {
        let source = InputSource::resolve(file)?;
        handle_input(cli, &source).with_context(|| format!("processing {source}"))?;
    }
    Ok(())
}

fn handle_input(cli: &Cli, source: &InputSource) -> Result<()> {
    let dot = generate_dot(cli, source)?;
    if !cli.render_externally() {
        return process::write_dot_stdout(&dot);
    }

    let output = source.output_path(&cli.format);

    // Keep the temporary file alive for the duration of the renderer call.
    let dot_path: Utf8PathBuf;
    let _tmp_file_guard: Option<NamedTempFile>;
    if cli.emit_dot {
        dot_path = source.dot_path();
        if dot_path == output {
            return Err(RunnerError::OutputClash {
                path: output.into_string(),
            }
            .into());
        }
        process::write_dot_file(&dot_path, &dot)?;
        _tmp_file_guard = None;
    } else {
        let tmp = process::create_temp_dot_file(&dot)?;
        dot_path = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
            .map_err(|path| io::Error::other(format!("non UTF-8 temp path {}", path.display())))
            .context("locate temporary DOT file")?;
        _tmp_file_guard = Some(tmp);
    }

    let program = process::resolve_dot_program();
    run_dot(&program, &cli.format, dot_path.as_std_path(), &output).with_context(|| {
        format!(
            "running {} on {} to produce {output}",
            program.display(),
            dot_path
        )
    })?;
    info!(input = %source, output = %output, "rendered graph");
    Ok(())
}

/// Parse `source` and compile it to DOT with the CLI's options.
///
/// # Errors
///
/// Returns an error if the source cannot be read or parsed.
pub fn generate_dot(cli: &Cli, source: &InputSource) -> Result<DotContent> {
    let graph = load_graph(cli, source)?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        let graph_json = serde_json::to_string_pretty(&graph).context("serialising graph")?;
        debug!("Graph:\n{graph_json}");
    }
    Ok(DotContent::new(dot_gen::compile(
        graph,
        &cli.render_options(),
    )))
}

fn load_graph(cli: &Cli, source: &InputSource) -> Result<MikadoGraph> {
    let options = cli.parse_options();
    let graph = match source {
        InputSource::Stdin => parser::from_reader(io::stdin().lock(), source.name(), &options),
        InputSource::File(path) => parser::from_path(path, &options),
    }
    .with_context(|| format!("parsing {source}"))?;
    debug!(source = %source, nodes = graph.len(), "parsed graph");
    Ok(graph)
}
