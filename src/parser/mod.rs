//! Mikado notation parser.
//!
//! Each line is a chain of labels separated by `->`, where every label
//! depends on the one to its right. A line that starts with `->` continues
//! from an earlier mention: the arrow's column must fall inside the column
//! interval of a node parsed on a previous line. Repeated mentions of a name
//! merge into one [`Node`](crate::graph::Node).
//!
//! ```text
//! Release 2.0 -> Drop legacy API -> Migrate callers
//!                                -> Update docs ✓
//! ```
//!
//! # Examples
//!
//! ```
//! use mikado::parser::{self, ParseOptions};
//!
//! let graph = parser::from_str("Goal -> Step ✓", &ParseOptions::default())?;
//! assert!(graph.get("Goal").is_some_and(|n| n.root));
//! assert!(graph.get("Step").is_some_and(|n| n.done));
//! # Ok::<(), mikado::parser::ParseError>(())
//! ```

mod error;
mod label;
mod position;

pub use error::ParseError;

use crate::graph::MikadoGraph;
use camino::Utf8Path;
use label::Label;
use position::{Occurrence, OccurrenceStack};
use std::io::Read;
use tracing::debug;

/// Token separating a node from its prerequisite.
pub const ARROW: &str = "->";

/// Columns taken up by [`ARROW`].
const ARROW_WIDTH: usize = 2;

/// Display name used when the input has no path.
const ANONYMOUS_SOURCE: &str = "<input>";

/// Switches that alter how labels are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Strip done markers without marking nodes as done.
    pub ignore_done: bool,
}

/// Parse notation text into a graph.
///
/// # Errors
///
/// Returns [`ParseError::UnresolvedContinuation`] when a leading arrow is not
/// aligned with any earlier node.
pub fn from_str(text: &str, options: &ParseOptions) -> Result<MikadoGraph, ParseError> {
    from_str_named(text, ANONYMOUS_SOURCE, options)
}

/// Parse notation text, naming the source `name` in diagnostics.
///
/// # Errors
///
/// Returns [`ParseError::UnresolvedContinuation`] when a leading arrow is not
/// aligned with any earlier node.
pub fn from_str_named(
    text: &str,
    name: &str,
    options: &ParseOptions,
) -> Result<MikadoGraph, ParseError> {
    from_lines(text.lines(), name, options)
}

/// Parse a sequence of lines.
///
/// # Errors
///
/// Returns [`ParseError::UnresolvedContinuation`] when a leading arrow is not
/// aligned with any earlier node.
pub fn from_lines<'a, I>(
    lines: I,
    name: &str,
    options: &ParseOptions,
) -> Result<MikadoGraph, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut builder = GraphBuilder::new(name, options);
    for (idx, line) in lines.into_iter().enumerate() {
        builder.line(idx + 1, line)?;
    }
    Ok(builder.finish())
}

/// Read and parse everything from `reader`.
///
/// # Errors
///
/// Returns [`ParseError::UnreadableSource`] if reading fails and
/// [`ParseError::UnresolvedContinuation`] for misaligned continuations.
pub fn from_reader(
    mut reader: impl Read,
    name: &str,
    options: &ParseOptions,
) -> Result<MikadoGraph, ParseError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| ParseError::UnreadableSource {
            path: name.into(),
            source,
        })?;
    from_str_named(&text, name, options)
}

/// Load and parse the file at `path`.
///
/// # Errors
///
/// Returns [`ParseError::UnreadableSource`] if the file cannot be read and
/// [`ParseError::UnresolvedContinuation`] for misaligned continuations.
pub fn from_path(path: &Utf8Path, options: &ParseOptions) -> Result<MikadoGraph, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::UnreadableSource {
        path: path.to_owned(),
        source,
    })?;
    from_str_named(&text, path.as_str(), options)
}

/// Incremental state shared across the lines of one source.
struct GraphBuilder<'a> {
    name: &'a str,
    options: &'a ParseOptions,
    graph: MikadoGraph,
    open: OccurrenceStack,
}

impl<'a> GraphBuilder<'a> {
    fn new(name: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            name,
            options,
            graph: MikadoGraph::default(),
            open: OccurrenceStack::default(),
        }
    }

    fn finish(self) -> MikadoGraph {
        self.graph
    }

    fn line(&mut self, number: usize, text: &str) -> Result<(), ParseError> {
        let content = text.trim_start();
        if content.is_empty() || content.starts_with('#') {
            return Ok(());
        }

        let mut segments = text.split(ARROW);
        let mut parent = None;
        let mut cursor = 0;
        let mut head = None;
        if let Some(first) = segments.next() {
            if first.trim().is_empty() {
                let column = first.chars().count();
                let target = self
                    .open
                    .find(column)
                    .ok_or_else(|| ParseError::unresolved(self.name, number, column, text))?;
                debug!(line = number, column, parent = %target.name, "continuation attached");
                parent = Some(target.name.clone());
                cursor = column + ARROW_WIDTH;
            } else {
                head = Some(first);
            }
        }

        for segment in head.into_iter().chain(segments) {
            let start = cursor + leading_width(segment);
            cursor += segment.chars().count() + ARROW_WIDTH;
            let name = self.mention(segment, parent.as_deref());
            self.open.push(Occurrence {
                name: name.clone(),
                start,
                end: cursor,
            });
            parent = Some(name);
        }
        Ok(())
    }

    /// Merge one mention into the registry and link it under `parent`.
    fn mention(&mut self, segment: &str, parent: Option<&str>) -> String {
        let label = Label::parse(segment, self.options.ignore_done);
        let node = self.graph.get_or_create(&label.name);
        node.mark_done(label.done);
        node.root = parent.is_none();
        if let Some(parent_name) = parent {
            self.graph
                .get_or_create(parent_name)
                .prereqs
                .push(label.name.clone());
        }
        label.name
    }
}

fn leading_width(segment: &str) -> usize {
    segment.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests;
